pub mod command;
pub mod run;

pub use run::{run, run_app};

use crate::domain::Contact;
use std::error::Error;

pub fn display_contact(position: usize, contact: &Contact) -> String {
    format!(
        "{position:>3}. {:<20} {:15} {}",
        contact.name, contact.phone_number, contact.id
    )
}

/// Message followed by each underlying cause, `: `-separated.
pub fn describe_error(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
