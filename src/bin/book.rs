// Type `back` at any prompt to return to the previous step.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use nailsure::models::{LocationType, NoticeLevel, ServiceSelection, SiteContent, Step, UserInfo};
use nailsure::services::gateway::http::HttpGateway;
use nailsure::services::gateway::ServiceCatalog;
use nailsure::services::wizard::{BookingWizard, StepInput, WizardError};

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

enum Answer {
    Text(String),
    Back,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> anyhow::Result<Option<Answer>> {
        print!("{label}: ");
        std::io::stdout().flush()?;
        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim().to_string();
        if line.eq_ignore_ascii_case("back") {
            return Ok(Some(Answer::Back));
        }
        Ok(Some(Answer::Text(line)))
    }
}

fn report(err: &WizardError) {
    match err {
        WizardError::Invalid(fields) => {
            for f in fields.iter() {
                println!("  ! {}: {}", f.field, f.message);
            }
        }
        other => println!("  ! {other}"),
    }
}

macro_rules! answer {
    ($prompt:expr, $wizard:expr, $label:expr) => {
        match $prompt.ask($label).await? {
            None => return Ok(()),
            Some(Answer::Back) => {
                $wizard.back();
                continue;
            }
            Some(Answer::Text(text)) => text,
        }
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let base_url =
        std::env::var("BOOKING_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let gateway = HttpGateway::new(base_url);

    let services = gateway.services().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load services, using the built-in list");
        SiteContent::default().services
    });
    let mut wizard = BookingWizard::new(services);
    let mut prompt = Prompt::new();

    loop {
        let step = wizard.step();
        println!("\nStep {} of 4: {}", step.number(), step.title());

        let result = match step {
            Step::UserInfo => {
                let name = answer!(prompt, wizard, "Full name");
                let email = answer!(prompt, wizard, "Email");
                let phone = answer!(prompt, wizard, "Phone");
                wizard.advance(StepInput::UserInfo(UserInfo { name, email, phone }))
            }
            Step::ServiceSelection => {
                for (i, s) in wizard.services().iter().enumerate() {
                    println!("  {}. {} (${:.2}, {} min)", i + 1, s.name, s.price, s.duration);
                }
                let choice = answer!(prompt, wizard, "Service number");
                let service_id = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| wizard.services().get(i))
                    .map(|s| s.id.clone())
                    .unwrap_or(choice);
                wizard.advance(StepInput::Service(ServiceSelection { service_id }))
            }
            Step::Location => {
                let kind = answer!(prompt, wizard, "Studio or mobile [studio]");
                let location_type = if kind.is_empty() {
                    Some(LocationType::Studio)
                } else {
                    LocationType::parse(&kind)
                };
                let address = if location_type == Some(LocationType::Mobile) {
                    Some(answer!(prompt, wizard, "Address"))
                } else {
                    None
                };
                wizard.advance(StepInput::Location {
                    location_type,
                    address,
                })
            }
            Step::Schedule => {
                let date = answer!(prompt, wizard, "Date (YYYY-MM-DD)");
                if let Err(e) = wizard.set_date(&date) {
                    report(&e);
                    continue;
                }
                println!("  Available: {}", wizard.slots().join(", "));
                let slot = answer!(prompt, wizard, "Time slot");
                match wizard.select_time_slot(&slot) {
                    Ok(notice) => println!("  {}", notice.message),
                    Err(e) => {
                        report(&e);
                        continue;
                    }
                }

                let confirm = answer!(prompt, wizard, "Confirm booking? [y/N]");
                if !confirm.eq_ignore_ascii_case("y") {
                    continue;
                }
                match wizard.submit(&gateway).await {
                    Ok(notice) => {
                        println!("{}", notice.message);
                        if notice.level == NoticeLevel::Success {
                            return Ok(());
                        }
                    }
                    Err(e) => report(&e),
                }
                continue;
            }
        };

        if let Err(e) = result {
            report(&e);
        }
    }
}
