//! Build script for dsps-board
//!
//! - Validates board.toml at compile time
//! - Generates the board constants the pin tables are built from

use std::collections::BTreeSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Bonded pins per port
const PORT_PINS: [u8; 2] = [32, 23];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DSPS_BOARD_TOML");

    let config_path = env::var("DSPS_BOARD_TOML")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("board.toml"));
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = load_config(&config_path);
    let board = validate(&config);

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board_config.rs"), generate(&board)).unwrap();
}

/// Validated board description
struct Board {
    uart_instance: u8,
    baud_rate: u32,
    flow_control: &'static str,
    rx: (u8, u8),
    tx: (u8, u8),
    flow_pins: Option<((u8, u8), (u8, u8))>,
    dma: (u8, u8),
    fifo: (u8, u8),
    burst: (u8, u8),
    power: &'static str,
    button: (u8, u8),
    button_active_high: bool,
    strobe: Option<(u8, u8)>,
}

fn load_config(path: &Path) -> toml::Value {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(
            &format!("Failed to read {}", path.display()),
            &[e.to_string()],
        ),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board description",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    }
}

/// Abort the build with a boxed diagnostic
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Parse "P<port>_<pin>"
fn parse_pin(s: &str) -> Option<(u8, u8)> {
    let rest = s.trim().strip_prefix('P')?;
    let (port, pin) = rest.split_once('_')?;
    let port: u8 = port.parse().ok()?;
    let pin: u8 = pin.parse().ok()?;
    if (port as usize) >= PORT_PINS.len() || pin >= PORT_PINS[port as usize] {
        return None;
    }
    Some((port, pin))
}

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

fn int_field(
    table: &toml::value::Table,
    sec: &str,
    key: &str,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (0..=max).contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be 0-{}", sec, key, max));
            0
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", sec, key));
            0
        }
        None => {
            errors.push(format!("[{}] missing '{}'", sec, key));
            0
        }
    }
}

fn pin_field(
    table: &toml::value::Table,
    sec: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<(u8, u8)> {
    match table.get(key) {
        Some(toml::Value::String(s)) => {
            let pin = parse_pin(s);
            if pin.is_none() {
                errors.push(format!("[{}] {} = \"{}\" is not a valid pin", sec, key, s));
            }
            pin
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be a string like \"P0_8\"", sec, key));
            None
        }
        None => None,
    }
}

fn choice(
    table: &toml::value::Table,
    sec: &str,
    key: &str,
    options: &[&'static str],
    errors: &mut Vec<String>,
) -> &'static str {
    match table.get(key) {
        Some(toml::Value::String(s)) => match options.iter().find(|o| **o == s.as_str()) {
            Some(o) => o,
            None => {
                errors.push(format!("[{}] {} must be one of {:?}", sec, key, options));
                options[0]
            }
        },
        _ => {
            errors.push(format!("[{}] missing '{}'", sec, key));
            options[0]
        }
    }
}

fn validate(config: &toml::Value) -> Board {
    let mut errors = Vec::new();
    let empty = toml::value::Table::new();

    let uart = section(config, "uart", &mut errors).unwrap_or(&empty);
    let power = section(config, "power", &mut errors).unwrap_or(&empty);
    let button = section(config, "button", &mut errors).unwrap_or(&empty);
    // [debug] is optional
    let debug = match config.get("debug") {
        Some(toml::Value::Table(t)) => t,
        _ => &empty,
    };

    let uart_instance = int_field(uart, "uart", "instance", 3, &mut errors) as u8;
    if uart_instance == 0 {
        errors.push("[uart] instance must be 1, 2 or 3".to_string());
    }
    let baud_rate = int_field(uart, "uart", "baud_rate", 2_000_000, &mut errors) as u32;
    if baud_rate == 0 {
        errors.push("[uart] baud_rate must not be 0".to_string());
    }
    let flow_modes = ["hardware", "software", "none"];
    let flow_control = choice(uart, "uart", "flow_control", &flow_modes, &mut errors);

    let rx = pin_field(uart, "uart", "rx", &mut errors);
    let tx = pin_field(uart, "uart", "tx", &mut errors);
    if rx.is_none() || tx.is_none() {
        errors.push("[uart] rx and tx are required".to_string());
    }
    let rts = pin_field(uart, "uart", "rts", &mut errors);
    let cts = pin_field(uart, "uart", "cts", &mut errors);
    let flow_pins = if flow_control == "hardware" {
        if uart_instance == 1 {
            errors.push("[uart] instance 1 has no RTS/CTS lines".to_string());
        }
        match (rts, cts) {
            (Some(rts), Some(cts)) => Some((rts, cts)),
            _ => {
                errors.push("[uart] flow_control = \"hardware\" needs rts and cts".to_string());
                None
            }
        }
    } else {
        None
    };

    let dma_rx = int_field(uart, "uart", "dma_rx", 7, &mut errors) as u8;
    let dma_tx = int_field(uart, "uart", "dma_tx", 7, &mut errors) as u8;
    if dma_rx == dma_tx {
        errors.push("[uart] dma_rx and dma_tx must differ".to_string());
    }
    if dma_rx % 2 != 0 || dma_tx % 2 != 1 {
        errors.push("[uart] dma_rx must be an even channel, dma_tx odd".to_string());
    }
    let fifo = (
        int_field(uart, "uart", "fifo_tx_trigger", 3, &mut errors) as u8,
        int_field(uart, "uart", "fifo_rx_trigger", 3, &mut errors) as u8,
    );
    let burst = (
        int_field(uart, "uart", "dma_tx_burst", 2, &mut errors) as u8,
        int_field(uart, "uart", "dma_rx_burst", 2, &mut errors) as u8,
    );

    let power = choice(power, "power", "level", &["3v3", "1v8"], &mut errors);

    let button_pin = pin_field(button, "button", "pin", &mut errors);
    if button_pin.is_none() {
        errors.push("[button] pin is required".to_string());
    }
    let button_active = choice(button, "button", "active", &["low", "high"], &mut errors);
    let button_active_high = button_active == "high";

    let strobe = pin_field(debug, "debug", "strobe", &mut errors);

    // Every pin used once
    let mut used = BTreeSet::new();
    let all = [rx, tx, flow_pins.map(|p| p.0), flow_pins.map(|p| p.1), button_pin, strobe];
    for (port, pin) in all.iter().flatten() {
        if !used.insert((*port, *pin)) {
            errors.push(format!("P{}_{} is assigned twice", port, pin));
        }
    }

    if !errors.is_empty() {
        fail("Invalid board description", &errors);
    }

    println!("cargo:warning=board description validated successfully");

    Board {
        uart_instance,
        baud_rate,
        flow_control,
        rx: rx.unwrap_or_default(),
        tx: tx.unwrap_or_default(),
        flow_pins,
        dma: (dma_rx, dma_tx),
        fifo,
        burst,
        power,
        button: button_pin.unwrap_or_default(),
        button_active_high,
        strobe,
    }
}

fn pin_expr((port, pin): (u8, u8)) -> String {
    format!("PinId::new(Port::P{}, {})", port, pin)
}

fn generate(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("// Generated by build.rs from the board description. Do not edit.\n\n");

    let flow = match board.flow_control {
        "hardware" => "FlowControl::Hardware",
        "software" => "FlowControl::Software",
        _ => "FlowControl::None",
    };
    let flow_pins = match board.flow_pins {
        Some((rts, cts)) => format!("Some(({}, {}))", pin_expr(rts), pin_expr(cts)),
        None => "None".to_string(),
    };
    let power = match board.power {
        "1v8" => "PowerLevel::V1_8",
        _ => "PowerLevel::V3_3",
    };
    let active = if board.button_active_high {
        "ActiveLevel::High"
    } else {
        "ActiveLevel::Low"
    };
    let strobe = match board.strobe {
        Some(pin) => format!("Some({})", pin_expr(pin)),
        None => "None".to_string(),
    };

    let instance = board.uart_instance;
    writeln!(out, "pub const UART_INSTANCE: UartId = UartId::Uart{};", instance).unwrap();
    writeln!(out, "pub const UART_BAUD_RATE: u32 = {};", board.baud_rate).unwrap();
    writeln!(out, "pub const UART_FLOW_CONTROL: FlowControl = {};", flow).unwrap();
    writeln!(out, "pub const UART_RX: PinId = {};", pin_expr(board.rx)).unwrap();
    writeln!(out, "pub const UART_TX: PinId = {};", pin_expr(board.tx)).unwrap();
    writeln!(out, "/// RTS and CTS, present only with hardware flow control").unwrap();
    writeln!(out, "pub const UART_FLOW_PINS: Option<(PinId, PinId)> = {};", flow_pins).unwrap();
    writeln!(out, "pub const UART_DMA_RX: DmaChannel = DmaChannel::Ch{};", board.dma.0).unwrap();
    writeln!(out, "pub const UART_DMA_TX: DmaChannel = DmaChannel::Ch{};", board.dma.1).unwrap();
    writeln!(out, "pub const UART_FIFO_TX_TRIGGER: u8 = {};", board.fifo.0).unwrap();
    writeln!(out, "pub const UART_FIFO_RX_TRIGGER: u8 = {};", board.fifo.1).unwrap();
    writeln!(out, "pub const UART_DMA_TX_BURST: u8 = {};", board.burst.0).unwrap();
    writeln!(out, "pub const UART_DMA_RX_BURST: u8 = {};", board.burst.1).unwrap();
    writeln!(out, "pub const PIN_POWER: PowerLevel = {};", power).unwrap();
    writeln!(out, "pub const BUTTON_PIN: PinId = {};", pin_expr(board.button)).unwrap();
    writeln!(out, "pub const BUTTON_ACTIVE: ActiveLevel = {};", active).unwrap();
    writeln!(out, "pub const DEBUG_STROBE: Option<PinId> = {};", strobe).unwrap();

    out
}
