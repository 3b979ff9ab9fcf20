//! Account commands: register, login, logout, profile, credits and friends.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;
use shared::{
    RecordId, SessionRecord, SessionRepository, UserKind,
    models::Credentials,
};
use tracing::{info, warn};

use super::print_json;
use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum CreditsCommand {
    /// Add credits to the logged-in account
    Add {
        amount: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum FriendsCommand {
    /// Add a friend by name to the logged-in account
    Add {
        name: String,
    },
}

pub async fn register(ctx: &AppContext, name: String, kind: UserKind) -> Result<()> {
    let user = ctx
        .client
        .register(&Credentials::new(name, kind))
        .await
        .context("registration failed")?;
    remember(ctx, &user)?;
    print_json(&user)
}

pub async fn login(ctx: &AppContext, name: String, kind: UserKind) -> Result<()> {
    let user = ctx
        .client
        .login(&Credentials::new(name, kind))
        .await
        .context("login failed")?;
    remember(ctx, &user)?;
    print_json(&user)
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session
        .clear_current_user()
        .context("failed to clear the stored session")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session.current_user() {
        Some(record) => print_json(&serde_json::to_value(&record)?),
        None => {
            println!("Not logged in.");
            Ok(())
        }
    }
}

pub async fn user(ctx: &AppContext, id: Option<String>) -> Result<()> {
    let id = match id {
        Some(id) => RecordId::from(id),
        None => ctx.require_session()?.id,
    };
    let user = ctx
        .client
        .get_user(&id)
        .await
        .with_context(|| format!("failed to fetch user {id}"))?;
    print_json(&user)
}

pub async fn credits(ctx: &AppContext, command: CreditsCommand) -> Result<()> {
    let record = ctx.require_session()?;
    match command {
        CreditsCommand::Add { amount } => {
            let user = ctx
                .client
                .add_credits(&record.id, amount)
                .await
                .context("failed to add credits")?;
            refresh(ctx, &record, &user);
            print_json(&user)
        }
    }
}

pub async fn friends(ctx: &AppContext, command: FriendsCommand) -> Result<()> {
    let record = ctx.require_session()?;
    match command {
        FriendsCommand::Add { name } => {
            let user = ctx
                .client
                .add_friend(&record.id, &name)
                .await
                .context("failed to add friend")?;
            refresh(ctx, &record, &user);
            print_json(&user)
        }
    }
}

/// Stores the user returned by register/login as the current session.
fn remember(ctx: &AppContext, user: &Value) -> Result<()> {
    let record = SessionRecord::from_value(user.clone())
        .context("backend returned a user without id, name or type")?;
    ctx.session
        .set_current_user(&record)
        .with_context(|| format!("failed to store session at {}", ctx.session.path().display()))?;
    info!(user = %record.name, "session stored");
    Ok(())
}

/// Replaces the stored session with a fresher copy of the same user.
fn refresh(ctx: &AppContext, current: &SessionRecord, user: &Value) {
    match SessionRecord::from_value(user.clone()) {
        Ok(updated) if updated.id == current.id => {
            if let Err(err) = ctx.session.set_current_user(&updated) {
                warn!(error = %err, "could not refresh stored session");
            }
        }
        _ => {}
    }
}
