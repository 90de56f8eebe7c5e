use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::asset::AssetType;
use crate::config::DEFAULT_CONFIG_PATH;
use crate::opex::OpexBreakdown;
use crate::tco::ScenarioReport;

#[derive(Parser, Debug)]
#[command(
    name = "tco_calculator",
    version,
    about = "Total cost of ownership for trucks and ships"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Config file (created with defaults if missing)"
    )]
    pub config: PathBuf,
    #[arg(long, global = true, help = "Override the truck coefficient store path")]
    pub truck_db: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the ship coefficient store path")]
    pub ship_db: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 시나리오 JSON 파일을 평가한다.
    Run {
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,
        #[arg(long, help = "Print the full report as JSON")]
        json: bool,
    },
    /// 계수 저장소에 있는 국가 목록을 출력한다.
    Countries {
        #[arg(value_parser = parse_asset_type)]
        asset: AssetType,
    },
}

fn parse_asset_type(raw: &str) -> Result<AssetType, String> {
    AssetType::parse(raw).ok_or_else(|| format!("expected 'truck' or 'ship', got '{raw}'"))
}

/// 시나리오 결과를 사람이 읽을 수 있는 요약으로 만든다.
pub fn render_report(report: &ScenarioReport) -> String {
    let mut out = String::new();
    let m = &report.meta;
    let t = &report.tco;
    let _ = writeln!(out, "=== {} ({}) ===", m.description, m.asset_type);
    let _ = writeln!(
        out,
        "years={}  discount_rate={:.4}  annual_distance={:.0}",
        m.operation_years, m.discount_rate, m.annual_distance_travel
    );

    let c = &report.capex;
    let _ = writeln!(out, "\n-- CAPEX --");
    let _ = writeln!(out, "vehicle            {:>16.2}", c.vehicle_cost);
    let _ = writeln!(out, "infrastructure     {:>16.2}", c.infrastructure_cost);
    let _ = writeln!(out, "taxes              {:>16.2}", c.taxes);
    let _ = writeln!(out, "financing          {:>16.2}", c.financing_cost);
    let _ = writeln!(out, "subsidies          {:>16.2}", -c.subsidies);
    let _ = writeln!(out, "total              {:>16.2}", c.total);

    let rv = &report.rv;
    let _ = writeln!(out, "\n-- Residual value --");
    let _ = writeln!(out, "depreciated value  {:>16.2}", rv.depreciated_value);
    let _ = writeln!(out, "health factor      {:>16.4}", rv.health_factor);
    let _ = writeln!(out, "external factor    {:>16.4}", rv.external_factor);
    let _ = writeln!(out, "residual value     {:>16.2}", rv.rv);

    let _ = writeln!(out, "\n-- OPEX (annual) --");
    for (label, value) in opex_lines(&report.opex.breakdown) {
        let _ = writeln!(out, "{label:<19}{value:>16.2}");
    }
    let _ = writeln!(out, "total              {:>16.2}", report.opex.opex_total);

    let _ = writeln!(out, "\n-- TCO --");
    let _ = writeln!(out, "crf                {:>16.6}", t.crf);
    let _ = writeln!(out, "rv discounted      {:>16.2}", t.rv_discounted);
    let _ = writeln!(out, "capex component    {:>16.2}", t.capex_component);
    let _ = writeln!(out, "opex component PV  {:>16.2}", t.opex_component_pv);
    let _ = writeln!(out, "tco total          {:>16.2}", t.tco_total);
    let _ = writeln!(out, "equiv. annual cost {:>16.2}", t.equivalent_annual_cost);
    match t.tco_per_distance_unit {
        Some(v) => {
            let _ = writeln!(out, "per distance unit  {v:>16.4}");
        }
        None => {
            let _ = writeln!(out, "per distance unit  {:>16}", "n/a");
        }
    }
    out
}

fn opex_lines(breakdown: &OpexBreakdown) -> Vec<(&'static str, f64)> {
    match breakdown {
        OpexBreakdown::Truck(b) => vec![
            ("taxes", b.taxes),
            ("insurance", b.insurance),
            ("maintenance", b.maintenance),
            ("energy", b.energy),
            ("tolls", b.tolls),
            ("driver", b.driver),
        ],
        OpexBreakdown::Ship(b) => vec![
            ("taxes", b.taxes),
            ("ports", b.ports),
            ("insurance", b.insurance),
            ("crew", b.crew),
            ("maintenance", b.maintenance),
            ("energy", b.energy),
        ],
    }
}
