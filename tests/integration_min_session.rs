// Drives the compiled binary through a PTY to exercise the real event loop
// and crossterm input handling.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_registers_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("tock");
    // Short window so a press lands after the target without a long wait
    let cmd = format!("{} -w 0.2 -d 0.2", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(400));

    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(200));

    // Peek at the stats tab, then leave
    p.send("\t")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
