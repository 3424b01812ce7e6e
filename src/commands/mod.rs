use crate::cli::{ChainCmd, Cmd, HistoryCmd, TeamCmd, TemplateCmd};
use crate::core::storage::AppCtx;

pub mod chain;
pub mod generate;
pub mod history;
pub mod prompt_logic;
pub mod render;
pub mod team;
pub mod template;

/// Dispatches the parsed command to the appropriate handler.
pub async fn dispatch(command: Cmd, ctx: &AppCtx) -> Result<(), String> {
    match command {
        Cmd::Template(template_cmd) => match template_cmd {
            TemplateCmd::List => template::list::run(ctx),
            TemplateCmd::New => template::new::run(ctx),
            TemplateCmd::Show { name } => template::show::run(ctx, &name),
            TemplateCmd::Edit { name } => template::edit::run(ctx, &name),
            TemplateCmd::Delete { name } => template::delete::run(ctx, &name),
        },
        Cmd::Render { prompt } => render::run(ctx, &prompt),
        Cmd::Generate {
            prompt,
            gen,
            user,
            provider,
        } => generate::run(ctx, &prompt, &gen, user.as_deref(), provider.as_deref()).await,
        Cmd::Chain(chain_cmd) => match chain_cmd {
            ChainCmd::New => chain::new::run(ctx),
            ChainCmd::List => chain::list::run(ctx),
            ChainCmd::Run {
                id,
                file,
                steps,
                input,
                gen,
                user,
                provider,
            } => {
                chain::run::run(
                    ctx,
                    id.as_deref(),
                    file.as_deref(),
                    &steps,
                    &input,
                    &gen,
                    user.as_deref(),
                    provider.as_deref(),
                )
                .await
            }
        },
        Cmd::History(history_cmd) => match history_cmd {
            HistoryCmd::List { user } => history::list::run(ctx, user.as_deref()),
            HistoryCmd::Show { key, user } => history::show::run(ctx, &key, user.as_deref()),
            HistoryCmd::Rate {
                key,
                rating,
                feedback,
                user,
            } => history::rate::run(ctx, &key, rating, feedback.as_deref(), user.as_deref()),
            HistoryCmd::Delete { key, user } => history::delete::run(ctx, &key, user.as_deref()),
            HistoryCmd::Export {
                key,
                format,
                out,
                user,
            } => history::export::run(ctx, &key, format, &out, user.as_deref()),
        },
        Cmd::Team(team_cmd) => match team_cmd {
            TeamCmd::Share { key, user } => team::share::run(ctx, &key, user.as_deref()),
            TeamCmd::List { user } => team::list::run(ctx, user.as_deref()),
        },
    }
}
