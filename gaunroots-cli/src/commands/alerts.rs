use anyhow::{Context, Result};
use clap::Subcommand;
use shared::{
    models::{AlertRegistration, DiseaseReport},
    validation::validate_phone_number,
};

use super::print_json;
use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum AlertsCommand {
    /// Subscribe a phone number to outbreak alerts
    Subscribe {
        /// Farmer's name
        #[arg(long, short)]
        name: String,
        /// Phone number, 10-15 digits with an optional leading +
        #[arg(long, short)]
        phone: String,
        /// Crops of interest, comma separated
        #[arg(long, short = 'C')]
        crops: String,
        /// Alert radius in kilometres
        #[arg(long, short, default_value_t = 10)]
        radius: u32,
    },
    /// Report a disease sighting
    Report {
        #[arg(long, short)]
        disease: String,
        #[arg(long, short = 'C')]
        crop: String,
        /// e.g. low, medium, high
        #[arg(long, short = 'S')]
        severity: String,
        #[arg(long)]
        description: Option<String>,
        /// Reporter's phone number, 10-15 digits with an optional leading +
        #[arg(long, short)]
        phone: String,
    },
    /// Show recent alerts
    Recent {
        /// Only alerts whose location contains this text
        #[arg(long, short)]
        location: Option<String>,
    },
}

pub async fn run(ctx: &AppContext, command: AlertsCommand) -> Result<()> {
    match command {
        AlertsCommand::Subscribe {
            name,
            phone,
            crops,
            radius,
        } => {
            let registration = AlertRegistration {
                farmer_name: name,
                phone_number: validate_phone_number(&phone)?,
                crop_types: crops,
                alert_radius: radius,
            };
            let response = ctx
                .client
                .register_for_alerts(&registration)
                .await
                .context("alert registration failed")?;
            print_json(&response)
        }
        AlertsCommand::Report {
            disease,
            crop,
            severity,
            description,
            phone,
        } => {
            let report = DiseaseReport {
                disease_name: disease,
                crop_type: crop,
                severity,
                description,
                reporter_phone: validate_phone_number(&phone)?,
            };
            let response = ctx
                .client
                .report_disease(&report)
                .await
                .context("disease report failed")?;
            print_json(&response)
        }
        AlertsCommand::Recent { location } => {
            let alerts = ctx
                .client
                .fetch_recent_alerts(location.as_deref())
                .await
                .context("failed to fetch recent alerts")?;
            print_json(&alerts)
        }
    }
}
