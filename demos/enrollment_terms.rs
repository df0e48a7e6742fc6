/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate canvas_lms;

use anyhow::Result;
use canvas_lms::v1::{Canvas, WorkflowState};
use chrono::Utc;
use dotenvy::dotenv;
use serde_json::json;

// Prints the terms of every account the token can administer, flagging the current one
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let api_url = std::env::var("CANVAS_API_URL")?;
    let api_key = std::env::var("CANVAS_API_KEY")?;
    let canvas = Canvas::new(&api_url, &api_key)?;

    let now = Utc::now();
    let accounts = canvas.get_accounts(())?.collect_all().await?;
    for account in accounts {
        println!("{}", account);

        let mut terms = account.get_enrollment_terms(json!({"workflow_state": ["active"]}))?;
        let terms = match terms.collect_all().await {
            Ok(terms) => terms,
            Err(e) if e.is_http_status() => {
                println!("  Skipping: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        for term in terms {
            if term.workflow_state == Some(WorkflowState::Deleted) {
                continue;
            }
            let current = term.start_at.is_none_or(|s| s <= now)
                && term.end_at.is_none_or(|e| now < e);
            println!(
                "  {}{} ({}) {} - {}",
                if current { "* " } else { "" },
                term.name.as_deref().unwrap_or_default(),
                term.id,
                term.start_at
                    .map_or("open".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                term.end_at
                    .map_or("open".to_string(), |d| d.format("%Y-%m-%d").to_string()),
            );
        }
    }
    Ok(())
}
