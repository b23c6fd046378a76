use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pas_cli::client::ApiClient;
use pas_cli::commands::{self, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pas_cli=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.base_url);

    match cli.command {
        Some(Commands::List(args)) => {
            let page = commands::list(&client, &args).await?;
            if page.rows.is_empty() {
                println!("No patients found.");
            }
            for patient in &page.rows {
                println!(
                    "ID: {}, Name: {} {}, Email: {}, Born: {}",
                    patient.id,
                    patient.first_name,
                    patient.last_name,
                    patient.email,
                    patient.date_of_birth
                );
            }
            println!(
                "Page {} of {} ({} records)",
                page.page,
                page.total_pages,
                page.total_records
            );
        }
        Some(Commands::Show { id }) => {
            let patient = client.get_patient_by_id(id).await?;
            println!("ID:            {}", patient.id);
            println!("First name:    {}", patient.first_name);
            println!("Last name:     {}", patient.last_name);
            println!("Email:         {}", patient.email);
            println!("Date of birth: {}", patient.date_of_birth);
            if let Some(created) = patient.created_date {
                println!("Created:       {}", created.to_rfc3339());
            }
        }
        Some(Commands::Visits { id }) => match commands::visits(&client, id).await? {
            Some(visits) => {
                for visit in visits {
                    println!(
                        "{}  {} ({})  visit {}",
                        visit.date.format("%Y-%m-%d %H:%M"),
                        visit.hospital_name,
                        visit.hospital_address,
                        visit.visit_id
                    );
                }
            }
            None => println!("No visits found for this patient."),
        },
        Some(Commands::Export { start, end, out }) => {
            let written = commands::export(&client, start, end, &out).await?;
            println!("Exported {} patients to {}", written, out.display());
        }
        None => {
            println!("Use 'pas --help' for commands");
        }
    }

    Ok(())
}
