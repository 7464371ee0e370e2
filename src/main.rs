#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod fmt;
mod preferences;
mod prelude;
mod quantity;
mod tables;
mod view_model;

use std::{sync::Arc, time::Duration};

use chrono::{Datelike, Local};
use clap::{Parser, crate_version};
use itertools::Itertools;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::{
    api::{sheets, webhook},
    cli::{AddArgs, Args, Command, LogsArgs, PricesArgs, StatisticsArgs, ThemeArgs},
    preferences::Preferences,
    prelude::*,
    tables::{
        build_charge_source_table,
        build_efficiency_table,
        build_log_summary_table,
        build_logs_table,
        build_price_options_table,
        build_series_table,
        build_statistics_table,
        build_totals_table,
    },
    view_model::{AddRecordViewModel, LogsViewModel, Refresh, StatisticsViewModel},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let mut preferences = Preferences::read_from(args.preferences_path);

    match args.command {
        Command::Logs(args) => logs(&args).await,
        Command::Statistics(args) => statistics(&args).await,
        Command::Add(args) => add(&args, &mut preferences).await,
        Command::Prices(args) => {
            prices(&args, &mut preferences);
            Ok(())
        }
        Command::Theme(args) => {
            theme(&args, &mut preferences);
            Ok(())
        }
    }
}

async fn logs(args: &LogsArgs) -> Result {
    let source = Arc::new(sheets::Api::try_new(args.sheets.spreadsheet())?);
    let mut view_model = LogsViewModel::new(source, args.period(Local::now().naive_local()));
    view_model.set_charge_type(args.charge_type());
    view_model.refresh(Refresh::Manual);
    view_model.settle().await;
    print_logs(&view_model)?;

    let Some(watch_interval) = args.watch else {
        return Ok(());
    };
    let mut interval = interval_after(watch_interval.into());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                view_model.enter_background();
                info!("stopped watching");
                return Ok(());
            }
            _ = interval.tick() => {
                view_model.set_period(args.period(Local::now().naive_local()));
                if view_model.enter_foreground() {
                    view_model.settle().await;
                    if let Err(error) = print_logs(&view_model) {
                        warn!("{error:#}");
                    }
                }
            }
        }
    }
}

fn print_logs(view_model: &LogsViewModel) -> Result {
    let state = view_model.state();
    if let Some(error) = state.error_message {
        bail!("載入失敗：{error}");
    }
    debug!(n_logs = state.logs.len(), is_loading = state.is_loading, "rendering…");
    let summary = view_model.summary();
    info!(n_entries = summary.entries.len(), period = %summary.period, "filtered");
    println!("{}", build_logs_table(&summary.entries));
    println!("{}", build_log_summary_table(&summary));
    Ok(())
}

async fn statistics(args: &StatisticsArgs) -> Result {
    let source = Arc::new(sheets::Api::try_new(args.sheets.spreadsheet())?);
    let mut view_model = StatisticsViewModel::new(source);
    view_model.mount(Local::now().year());
    if let Some(year) = &args.year {
        view_model.set_year(year.clone());
    }
    if let Some(time_range) = args.time_range {
        view_model.set_time_range(time_range);
    }
    if args.no_cache {
        view_model.refresh();
    }
    view_model.settle().await;
    print_statistics(&view_model)?;

    let Some(watch_interval) = args.watch else {
        return Ok(());
    };
    let mut interval = interval_after(watch_interval.into());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                view_model.enter_background();
                info!("stopped watching");
                return Ok(());
            }
            _ = interval.tick() => {
                view_model.enter_foreground();
                view_model.settle().await;
                if let Err(error) = print_statistics(&view_model) {
                    warn!("{error:#}");
                }
            }
        }
    }
}

fn print_statistics(view_model: &StatisticsViewModel) -> Result {
    let state = view_model.state();
    if let Some(error) = state.error_message {
        bail!("載入失敗：{error}");
    }
    debug!(n_entries = state.statistics.len(), is_loading = state.is_loading, "rendering…");
    if let Some(notice) = view_model.notice() {
        println!("{notice}");
    }
    let filters = view_model.filters();
    println!("年份：{}，時間範圍：{}", filters.year, filters.time_range.label());
    println!("可選年份：{}", view_model.available_years().iter().join("、"));

    let report = view_model.report();
    if report.entries().is_empty() {
        println!("暫無統計資料");
        return Ok(());
    }
    println!("{}", build_statistics_table(&report));
    println!("{}", build_totals_table(&report));
    println!("{}", build_series_table("充電度數", report.monthly_energy()));
    println!("{}", build_series_table("總費用", report.monthly_cost()));
    println!("{}", build_efficiency_table(report.efficiency_trend()));
    println!("{}", build_series_table("每公里成本", report.cost_per_km_trend()));
    println!("{}", build_charge_source_table(report.charge_source_split()));
    Ok(())
}

/// Ticker whose first tick comes one period from now.
fn interval_after(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn add(args: &AddArgs, preferences: &mut Preferences) -> Result {
    let sink = webhook::Api::try_new(args.webhook_url.clone())?;
    let mut view_model = AddRecordViewModel::new(preferences);
    if let Some(price) = &args.price {
        view_model.price_text.clone_from(price);
    } else if let Some(pick) = args.pick {
        let price = pick
            .checked_sub(1)
            .and_then(|index| view_model.price_options().get(index))
            .copied()
            .with_context(|| format!("there is no price option #{pick}"))?;
        view_model.select_price(price);
    }
    view_model.charge_type = args.charge_type;
    if !view_model.can_submit() {
        let custom_prices = preferences.custom_prices();
        let table = build_price_options_table(view_model.price_options(), |price| {
            custom_prices.contains(price)
        });
        println!("{table}");
    }
    info!(price = ?view_model.price(), charge_type = %view_model.charge_type, "submitting…");

    if view_model.submit(&sink, preferences).await.is_ok() {
        println!("{}", view_model.success_message().unwrap_or_default());
        Ok(())
    } else {
        bail!("{}", view_model.error_message().unwrap_or_default())
    }
}

fn prices(args: &PricesArgs, preferences: &mut Preferences) {
    if args.clear {
        preferences.clear_custom_prices();
        info!("cleared the custom prices");
    }
    let custom_prices = preferences.custom_prices();
    info!(n_custom_prices = custom_prices.len(), "loaded");
    let table = build_price_options_table(&preferences.price_options(), |price| {
        custom_prices.contains(price)
    });
    println!("{table}");
    if custom_prices.is_empty() {
        println!("成功新增紀錄後，新的價格會自動加入選項");
    }
}

fn theme(args: &ThemeArgs, preferences: &mut Preferences) {
    if let Some(mode) = args.mode {
        preferences.set_theme(mode);
    } else if args.toggle {
        preferences.set_theme(preferences.theme().toggled());
    }
    println!("{}", preferences.theme());
}
