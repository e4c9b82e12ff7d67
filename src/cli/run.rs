use crate::{
    cli::{describe_error, display_contact},
    config::BackendConfig,
    helper,
    prelude::{
        AppError, ContactId, ContactProvider, Session, UserId,
        command::{Cli, Commands},
        contact::{ValidationReq, validate_name, validate_number},
        storage,
    },
};
use clap::Parser;
use std::{error::Error, process::exit, sync::Arc};

pub async fn run_app() {
    helper::load_env_file();

    let cli = Cli::parse();
    helper::init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", describe_error(&*e));
        exit(1);
    }
}

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = BackendConfig::from_cli(&cli)?;
    let backend = storage::parse_backend(&config)?;

    let session = Arc::new(Session::new());
    if let Some(user) = cli.user.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        session.sign_in(UserId::new(user));
    }

    let provider = ContactProvider::mount(backend, session).await;
    tracing::debug!(
        backend = provider.backend_medium(),
        user = ?provider.scope(),
        "contact provider mounted"
    );

    match cli.command {
        Commands::List => {
            let contacts = provider.contacts();
            if contacts.is_empty() {
                println!("No personal contacts yet");
                return Ok(());
            }

            for (i, c) in contacts.iter().enumerate() {
                println!("{}", display_contact(i + 1, c));
            }
            Ok(())
        }

        Commands::Add { name, phone } => {
            validate_input(&name, &phone)?;

            let contact = provider.add_contact(name.trim(), phone.trim()).await?;

            println!("Contact added successfully (id: {})", contact.id);
            Ok(())
        }

        Commands::Edit { id, name, phone } => {
            validate_input(&name, &phone)?;

            provider
                .update_contact(&ContactId::new(id.trim()), name.trim(), phone.trim())
                .await?;

            println!("Contact updated successfully");
            Ok(())
        }

        Commands::Delete { id } => {
            provider.delete_contact(&ContactId::new(id.trim())).await?;

            println!("Contact deleted successfully");
            Ok(())
        }
    }
}

fn validate_input(name: &str, phone: &str) -> Result<(), AppError> {
    if !validate_name(name.trim())? {
        return Err(AppError::Validation(ValidationReq::name_req()));
    }

    if !validate_number(phone.trim())? {
        return Err(AppError::Validation(ValidationReq::phone_req()));
    }
    Ok(())
}
