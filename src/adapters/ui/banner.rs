//! Start-up banner: "MemoryOS" in figlet with a vertical gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Indigo (#6366f1).
const INDIGO: (u8, u8, u8) = (0x63, 0x66, 0xf1);
/// Teal (#14b8a6).
const TEAL: (u8, u8, u8) = (0x14, 0xb8, 0xa6);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("MemoryOS").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "MemoryOS".to_string())
}

/// Prints the banner, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(INDIGO, TEAL, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: TEAL.0,
        g: TEAL.1,
        b: TEAL.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.execute(Print("Your second brain, in the terminal\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(INDIGO, TEAL, 0.0), INDIGO);
        assert_eq!(lerp_rgb(INDIGO, TEAL, 1.0), TEAL);
    }

    #[test]
    fn test_banner_is_not_empty() {
        assert!(!banner_art().trim().is_empty());
    }
}
