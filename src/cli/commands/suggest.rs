use std::time::Duration;

use anyhow::Result;

use super::super::args::SuggestCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_failure, print_recommendations};
use super::context::CliContext;
use crate::suggest::{SuggestionClient, SuggestionRequest};

pub fn suggest(ctx: &CliContext, cmd: &SuggestCommand) -> Result<ExitStatus> {
    let request = SuggestionRequest {
        soil_type: cmd.soil_type.trim().to_string(),
        location: cmd.location.trim().to_string(),
        water: cmd.water.trim().to_string(),
        past_crops: cmd.past_crops.trim().to_string(),
    };
    if let Err(err) = request.validate() {
        print_failure(err.user_message());
        return Ok(ExitStatus::Failure);
    }

    let client = SuggestionClient::new(
        ctx.config.suggest_endpoint.as_str(),
        Duration::from_secs(ctx.config.suggest_timeout_secs),
    );
    eprintln!("Getting crop suggestions...");

    match client.fetch(&request) {
        Ok(response) => {
            print_recommendations(&ctx.t("suggest.results"), &response.recommendations);
            Ok(ExitStatus::Success)
        }
        Err(err) => {
            tracing::debug!("suggestion fetch failed: {}", err);
            print_failure(err.user_message());
            Ok(ExitStatus::Failure)
        }
    }
}
