use anyhow::Result;

use super::super::args::{MarketCommand, PricesCommand};
use super::super::exit_status::ExitStatus;
use super::super::report::{print_failure, print_options};
use super::context::CliContext;
use crate::core::{
    chart::{Chart, ChartSlot},
    format::market_summary,
    market::MarketIndex,
    selection::{Level, Selection, SelectionError},
};

const CHART_CANVAS: &str = "price-chart";

/// Apply `keys` to a fresh selection, one level at a time.
fn select_path(index: &MarketIndex, keys: &[&str]) -> Result<Selection, SelectionError> {
    let mut selection = Selection::new();
    for (level, key) in Level::ALL.iter().zip(keys) {
        selection.select(index, *level, key)?;
    }
    Ok(selection)
}

/// List the options for the first unchosen level.
pub fn market(ctx: &CliContext, cmd: &MarketCommand) -> Result<ExitStatus> {
    let index = ctx.market_index()?;
    let keys: Vec<&str> = [&cmd.state, &cmd.district, &cmd.market]
        .into_iter()
        .map_while(|key| key.as_deref())
        .collect();

    let selection = match select_path(&index, &keys) {
        Ok(selection) => selection,
        Err(err) => {
            print_failure(&err.to_string());
            return Ok(ExitStatus::Failure);
        }
    };

    let level = Level::ALL[keys.len()];
    let options = selection.options(&index, level);
    print_options(&ctx.t(level.message_key()), &options);
    Ok(ExitStatus::Success)
}

/// Render the price trend chart and summary for a full selection.
pub fn prices(ctx: &CliContext, cmd: &PricesCommand) -> Result<ExitStatus> {
    let index = ctx.market_index()?;
    let keys = [
        cmd.state.as_str(),
        cmd.district.as_str(),
        cmd.market.as_str(),
        cmd.crop.as_str(),
    ];

    let series = match select_path(&index, &keys)
        .and_then(|selection| selection.series(&index).copied())
    {
        Ok(series) => series,
        Err(err) => {
            print_failure(&err.to_string());
            return Ok(ExitStatus::Failure);
        }
    };

    let mut slot = ChartSlot::new(CHART_CANVAS);
    let chart = slot.replace(Chart::price_trend(&cmd.market, &cmd.crop, &series));

    println!("{}", ctx.t("market.trend"));
    print!("{}", chart.render());
    println!(
        "{}",
        market_summary([keys[0], keys[1], keys[2]], &cmd.crop, series.latest())
    );
    Ok(ExitStatus::Success)
}
