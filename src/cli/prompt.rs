//! Interactive conflict prompt

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use colored::*;
use tracing::{debug, warn};

use crate::application::ports::{ConflictChoice, ConflictResolver};
use crate::domain::config::ConflictPolicy;
use crate::domain::note::NoteTitle;

/// Asks on the terminal whether to append, overwrite or cancel.
/// End of input or an unrecognised answer cancels.
pub struct PromptResolver;

#[async_trait]
impl ConflictResolver for PromptResolver {
    async fn resolve(&self, title: &NoteTitle) -> ConflictChoice {
        let question = format!(
            "{} A note named \"{}\" already exists. [a]ppend, [o]verwrite or [c]ancel? ",
            "?".yellow(),
            title
        );

        let answer = tokio::task::spawn_blocking(move || {
            eprint!("{}", question);
            // The answer can still be read when the prompt was not flushed
            if let Err(e) = io::stderr().flush() {
                debug!(error = %e, "failed to flush prompt");
            }

            let mut line = String::new();
            let read = io::stdin().lock().read_line(&mut line);
            read.map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => parse_choice(&line),
            Ok(Err(e)) => {
                warn!(error = %e, "failed to read answer, cancelling");
                ConflictChoice::Cancel
            }
            Err(e) => {
                warn!(error = %e, "prompt task failed, cancelling");
                ConflictChoice::Cancel
            }
        }
    }
}

/// Interpret a typed answer
pub fn parse_choice(answer: &str) -> ConflictChoice {
    match answer.trim().to_lowercase().as_str() {
        "a" | "append" => ConflictChoice::Append,
        "o" | "overwrite" => ConflictChoice::Overwrite,
        _ => ConflictChoice::Cancel,
    }
}

/// Build the resolver for a configured policy
pub fn resolver_for(policy: ConflictPolicy) -> Box<dyn ConflictResolver> {
    match policy {
        ConflictPolicy::Ask => Box::new(PromptResolver),
        ConflictPolicy::Append => Box::new(ConflictChoice::Append),
        ConflictPolicy::Overwrite => Box::new(ConflictChoice::Overwrite),
        ConflictPolicy::Cancel => Box::new(ConflictChoice::Cancel),
    }
}
