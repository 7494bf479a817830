//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use anyhow::Result;
use clap::Args;
use vibra_core::{ParamUnit, ParameterInfo};
use vibra_effects::{ChorusFlangerParams, ModulationMode, TremoloParams};
use vibra_synth::{SynthParams, WaveType};

use super::common::EngineKind;

#[derive(Args)]
pub struct ParamsArgs {
    /// Engine to describe; all engines when omitted
    #[arg(value_enum)]
    engine: Option<EngineKind>,
}

/// Parameter store for `engine` holding its defaults.
pub fn default_store(engine: EngineKind) -> Box<dyn ParameterInfo> {
    match engine {
        EngineKind::Synth => Box::new(SynthParams::new()),
        EngineKind::Tremolo => Box::new(TremoloParams::new()),
        EngineKind::Chorus => Box::new(ChorusFlangerParams::new()),
        EngineKind::Flanger => {
            let params = ChorusFlangerParams::new();
            params.switch_mode(ModulationMode::Flanger);
            Box::new(params)
        }
    }
}

fn unit_label(unit: ParamUnit) -> &'static str {
    match unit {
        ParamUnit::None => "",
        ParamUnit::Ratio => "ratio",
        ParamUnit::Hertz => "Hz",
        ParamUnit::Milliseconds => "ms",
        ParamUnit::Seconds => "s",
        ParamUnit::Choice => "choice",
        ParamUnit::Toggle => "on/off",
    }
}

/// Print one row per parameter with its current value.
pub fn print_table(store: &dyn ParameterInfo) {
    println!(
        "  {:20}  {:10}  {:>10}  {:>10}  {}",
        "Key", "Unit", "Value", "Default", "Range"
    );
    println!(
        "  {:20}  {:10}  {:>10}  {:>10}  {}",
        "---", "----", "-----", "-------", "-----"
    );
    for index in 0..store.param_count() {
        let Some(desc) = store.param_info(index) else {
            continue;
        };
        let value = store.get_param(index);
        let shown = if desc.key == "wave_type" {
            WaveType::from_i32(value.round() as i32).map_or_else(|| value.to_string(), |w| w.name().to_string())
        } else {
            format!("{value:.4}")
        };
        println!(
            "  {:20}  {:10}  {:>10}  {:>10}  {} - {}",
            desc.key,
            unit_label(desc.unit),
            shown,
            desc.default,
            desc.min,
            desc.max
        );
    }
}

pub fn run(args: ParamsArgs) -> Result<()> {
    let engines: Vec<EngineKind> = match args.engine {
        Some(engine) => vec![engine],
        None => EngineKind::ALL.to_vec(),
    };

    for (i, engine) in engines.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", engine.name());
        println!("{}", "=".repeat(engine.name().len()));
        print_table(&*default_store(engine));
    }

    println!();
    println!("Wave types: {}", WaveType::ALL.map(WaveType::name).join(", "));
    Ok(())
}
