use std::error::Error;
use std::io::{self, BufRead, Write};

use qrview::{ECLevel, QRView, Surface, ViewEvent};

const EC_USAGE: &str = "Usage: :ec <L|M|Q|H>";
const SAVE_USAGE: &str = "Usage: :save <path>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Text(String),
    Level(ECLevel),
    Save(String),
}

fn parse_command(line: String) -> Result<Command, String> {
    let mut words = line.splitn(2, char::is_whitespace);
    match words.next() {
        Some(":ec") => match arg(words.next()) {
            Some(token) => token.parse().map(Command::Level).map_err(|e| format!("{e}. {EC_USAGE}")),
            None => Err(EC_USAGE.to_string()),
        },
        Some(":save") => match arg(words.next()) {
            Some(path) => Ok(Command::Save(path.to_string())),
            None => Err(SAVE_USAGE.to_string()),
        },
        _ => Ok(Command::Text(line)),
    }
}

fn arg(rest: Option<&str>) -> Option<&str> {
    rest.map(str::trim).filter(|s| !s.is_empty())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut view = QRView::with_defaults();
    print_surface(&view)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match parse_command(line?) {
            Ok(Command::Text(text)) => view.handle(ViewEvent::TextChanged(text)),
            Ok(Command::Level(ecl)) => view.handle(ViewEvent::ECLevelChanged(ecl)),
            Ok(Command::Save(path)) => {
                match view.bitmap().map(|bitmap| bitmap.save(&path)) {
                    Some(Ok(())) => println!("Saved to {path}"),
                    Some(Err(e)) => eprintln!("Couldn't save to {path}: {e}"),
                    None => eprintln!("Nothing to save"),
                }
                continue;
            }
            Err(usage) => {
                eprintln!("{usage}");
                continue;
            }
        }
        print_surface(&view)?;
    }

    Ok(())
}

fn print_surface(view: &QRView) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match view.surface() {
        Surface::Blank => {}
        Surface::Image(bitmap) => write!(out, "{}", bitmap.to_str())?,
        Surface::Fallback(msg) => writeln!(out, "{msg}")?,
    }
    writeln!(out, "[{}] {:?}", view.ec_level().label(), view.text())?;
    out.flush()
}
