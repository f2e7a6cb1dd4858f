// PDF Text Extractor
// Turns an uploaded résumé PDF into plain text. Stateless; nothing is stored.

pub mod handlers;
pub mod pdf;
