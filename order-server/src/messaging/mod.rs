//! Customer messaging
//!
//! Orders are handed to the store over WhatsApp: the server renders the
//! message and a `wa.me` deep link, the client opens it.

pub mod whatsapp;

pub use whatsapp::{build_whatsapp_message, format_phone, whatsapp_link};
