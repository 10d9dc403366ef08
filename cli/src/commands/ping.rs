//! Minion reachability probes.

use anyhow::Result;

use crate::commands::{decorate, Ctx};
use crate::output::print_ping;

pub async fn run_ping(ctx: &mut Ctx) -> Result<()> {
    let target = ctx.target.clone();
    let reachability = ctx
        .client
        .ping(&target)
        .await
        .map_err(|e| decorate(e, ctx.json))?;
    print_ping(&reachability, ctx.json);
    Ok(())
}

pub async fn run_minions(ctx: &mut Ctx) -> Result<()> {
    let minions = ctx
        .client
        .minions()
        .await
        .map_err(|e| decorate(e, ctx.json))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&minions)?);
        return Ok(());
    }
    if minions.is_empty() {
        println!("no minions responded");
        return Ok(());
    }
    for minion in &minions {
        println!("{minion}");
    }
    println!("{} minion(s) online", minions.len());
    Ok(())
}
