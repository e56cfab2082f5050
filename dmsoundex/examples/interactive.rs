//! Interactive soundex lookup
//!
//! Type a name per line; prints every code and whether it sounds like the
//! previous name (any shared code).
//!
//! Usage:
//!   cargo run -p dmsoundex --example interactive

use std::io::{self, BufRead, Write};

use dmsoundex::{DmSoundex, SoundexCodes};

fn sounds_alike(a: &SoundexCodes, b: &SoundexCodes) -> bool {
    a.iter().any(|code| b.contains(code))
}

fn main() -> anyhow::Result<()> {
    let dm = DmSoundex::new()?;
    println!(
        "Loaded {} rules. Enter names (empty line to quit):",
        dm.rules().len()
    );

    let mut previous: Option<(String, SoundexCodes)> = None;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let name = line?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }

        let codes = dm.codes(name);
        println!("  {} -> {}", dm.normalize(name), codes);
        if let Some((prev_name, prev_codes)) = &previous {
            if sounds_alike(&codes, prev_codes) {
                println!("  sounds like {prev_name}");
            }
        }
        previous = Some((name.to_string(), codes));
    }
    Ok(())
}
