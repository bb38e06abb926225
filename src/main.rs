//! CircuitLab - DC circuit solver demo
//!
//! Builds one of a few reference circuits, steps it like a render loop would,
//! and prints the solved node voltages and element readings.
//!
//! # Usage
//!
//! ```bash
//! circuitlab --demo bulb --real-bulbs --frames 10
//! RUST_LOG=debug circuitlab --demo short
//! ```

use circuitlab_core::{
    components::{Ammeter, Battery, ElementKind, LightBulb, Resistor, Switch, Voltmeter},
    error::Result,
    Circuit, Simulator,
};
use clap::{Parser, ValueEnum};

/// Demo circuits
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Demo {
    /// Battery across a single resistor, with a voltmeter
    Single,
    /// Two equal resistors in series, with an ammeter
    Series,
    /// Two equal resistors in parallel
    Parallel,
    /// Battery shorted by a wire
    Short,
    /// Battery driving a bulb through a switch
    Bulb,
}

/// Real-time DC circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit to build
    #[arg(short, long, value_enum, default_value_t = Demo::Single)]
    demo: Demo,

    /// Number of frames to step
    #[arg(short, long, default_value_t = 1)]
    frames: u64,

    /// Make bulb resistance follow dissipated power
    #[arg(long)]
    real_bulbs: bool,

    /// Battery EMF in volts
    #[arg(short, long, default_value_t = 9.0)]
    voltage: f64,

    /// Open every switch before solving
    #[arg(long)]
    open_switches: bool,
}

fn build(demo: Demo, voltage: f64, open_switches: bool) -> Result<Circuit> {
    let mut c = Circuit::new();
    let a = c.add_node(0.0, 0.0);
    let b = c.add_node(100.0, 0.0);
    c.add_element(ElementKind::Battery(Battery::new(voltage)), a, b)?;

    match demo {
        Demo::Single => {
            c.add_element(ElementKind::Resistor(Resistor::new(9.0)), a, b)?;
            c.add_element(ElementKind::Voltmeter(Voltmeter), a, b)?;
        }
        Demo::Series => {
            let m = c.add_node(50.0, 50.0);
            let k = c.add_node(100.0, 50.0);
            c.add_element(ElementKind::Resistor(Resistor::new(100.0)), a, m)?;
            c.add_element(ElementKind::Resistor(Resistor::new(100.0)), m, k)?;
            c.add_element(ElementKind::Ammeter(Ammeter::default()), k, b)?;
        }
        Demo::Parallel => {
            c.add_element(ElementKind::Resistor(Resistor::new(100.0)), a, b)?;
            c.add_element(ElementKind::Resistor(Resistor::new(100.0)), a, b)?;
        }
        Demo::Short => {
            c.add_wire(a, b)?;
        }
        Demo::Bulb => {
            let m = c.add_node(50.0, 50.0);
            let s = c.add_element(ElementKind::Switch(Switch::new(true)), a, m)?;
            c.add_element(ElementKind::LightBulb(LightBulb::new()), m, b)?;
            if open_switches {
                c.toggle_switch(s)?;
            }
        }
    }

    Ok(c)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let circuit = build(args.demo, args.voltage, args.open_switches)?;
    circuitlab_core::circuit::validate_circuit(&circuit)?;

    let mut simulator = Simulator::new(circuit);
    simulator.set_real_bulbs(args.real_bulbs);
    let status = simulator.run(args.frames);
    if !status.is_some_and(|s| s.is_solved()) {
        tracing::warn!(?status, "last frame produced no new readings");
    }

    println!("frames: {}  status: {:?}", simulator.frame(), status);
    println!();
    println!("{:<6} {:>12}", "node", "voltage (V)");
    for node in simulator.circuit().nodes() {
        println!("{:<6} {:>12.6}", node.id.to_string(), node.voltage);
    }

    println!();
    println!(
        "{:<6} {:<10} {:>12} {:>12} {:>12}  {}",
        "id", "kind", "current (A)", "drop (V)", "power (W)", "short"
    );
    for element in simulator.circuit().branches() {
        let r = &element.readings;
        println!(
            "{:<6} {:<10} {:>12.6} {:>12.6} {:>12.6}  {}",
            element.id.to_string(),
            element.kind.name(),
            r.current,
            r.voltage_drop,
            r.power,
            if r.is_short_circuit { "yes" } else { "" }
        );
    }

    Ok(())
}
