use anyhow::{Context, Result};
use clap::Parser;
use nhl_schedule_odds::export::{export_filename, save_csv, save_xlsx};
use nhl_schedule_odds::presenter::{ScheduleRow, COLUMNS};
use nhl_schedule_odds::{build_presenter, build_service, odds_client, Config, Season};

/// Print a team's season schedule with betting odds
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Team code to track, e.g. CHI
    #[arg(short, long)]
    team: Option<String>,

    /// Season, e.g. 20252026 (defaults to the current one)
    #[arg(short, long)]
    season: Option<Season>,

    /// Write the schedule to an xlsx file ("-" for the default file name)
    #[arg(long)]
    xlsx: Option<String>,

    /// Write the schedule to a CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Show remaining Odds API requests
    #[arg(long)]
    usage: bool,
}

fn print_table(rows: &[ScheduleRow]) {
    let mut widths = COLUMNS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 5]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(COLUMNS));
    for row in rows {
        println!("{}", line(row.cells()));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(team) = args.team {
        config.team_code = team.trim().to_ascii_uppercase();
    }
    if let Some(season) = args.season {
        config.season = Some(season);
    }

    let service = build_service(&config);
    let data = service
        .refresh()
        .await
        .context("Error fetching data from NHL API")?;

    println!("{}\n", data.title());

    let rows = build_presenter(&config).rows(&data.fixtures);
    if rows.is_empty() {
        println!("No schedule data found.");
    } else {
        print_table(&rows);
        println!("\nTimes shown in {}", config.display_tz.name());
    }

    if !data.odds_available {
        println!("Betting odds unavailable.");
    }
    if data.skipped > 0 {
        println!("{} game(s) omitted due to inconsistent results data.", data.skipped);
    }

    if let Some(path) = args.xlsx {
        let path = if path == "-" {
            let nickname = service
                .directory()
                .nickname(&data.team_code)
                .unwrap_or_else(|| data.team_code.to_lowercase());
            export_filename(&nickname, data.season)
        } else {
            path
        };
        save_xlsx(&rows, &path)?;
        println!("\nSaved schedule to {}", path);
    }

    if let Some(path) = args.csv {
        save_csv(&rows, &path)?;
        println!("\nSaved schedule to {}", path);
    }

    if args.usage {
        match odds_client(&config) {
            Some(client) => {
                let usage = client.check_usage().await?;
                println!("\n");
                if let Some(remaining) = usage.remaining {
                    println!("API requests remaining: {}", remaining);
                }
                if let Some(used) = usage.used {
                    println!("API requests used: {}", used);
                }
            }
            None => println!("\nODDS_API_KEY not set, no usage to report"),
        }
    }

    Ok(())
}
