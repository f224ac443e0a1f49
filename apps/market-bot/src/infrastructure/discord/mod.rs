//! Discord Adapter
//!
//! Slash commands on `poise`, registered when the session becomes ready.
//! Each command turns its options into a [`CommandRequest`], runs it through
//! [`BotServices::dispatch`] and sends the resulting reply.
//!
//! [`CommandRequest`]: crate::application::commands::CommandRequest

mod commands;
mod reply;

use poise::serenity_prelude as serenity;
use tokio_util::sync::CancellationToken;

use crate::application::commands::BotServices;
use crate::infrastructure::config::DiscordSettings;
use crate::infrastructure::health::ConnectionFlag;

pub use commands::all_commands;
pub use reply::create_reply;

/// Framework user data shared by every command invocation.
pub struct Data {
    /// Command handlers and their gateways.
    pub services: BotServices,
}

/// Framework error type.
pub type Error = anyhow::Error;

/// Command context.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Connect to Discord and serve slash commands until `cancel` fires.
///
/// Commands are registered in `settings.guild_id` when set (instant
/// availability), otherwise globally. `connected` is set once registration
/// succeeds.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the gateway session
/// ends with an error.
pub async fn run_bot(
    settings: &DiscordSettings,
    services: BotServices,
    connected: ConnectionFlag,
    cancel: CancellationToken,
) -> Result<(), Error> {
    let guild_id = settings.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match guild_id {
                    Some(id) => {
                        poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id))
                            .await?;
                    }
                    None => poise::builtins::register_globally(ctx, commands).await?,
                }

                tracing::info!(
                    user = %ready.user.name,
                    commands = commands.len(),
                    guild_id,
                    "Slash commands registered"
                );
                connected.set();

                Ok(Data { services })
            })
        })
        .build();

    let mut client =
        serenity::ClientBuilder::new(&settings.token, serenity::GatewayIntents::non_privileged())
            .framework(framework)
            .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        cancel.cancelled().await;
        tracing::info!("Disconnecting from Discord");
        shard_manager.shutdown_all().await;
    });

    client.start().await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!(error = %error, "Bot setup failed");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(
                command = %ctx.command().name,
                error = %error,
                "Failed to send command reply"
            );
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!(error = %e, "Error while handling framework error");
            }
        }
    }
}
