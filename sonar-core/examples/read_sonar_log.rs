//! Пример: разбор sonar-лога через decode_log
//!
//! Демонстрирует:
//! - выбор варианта формата по расширению файла
//! - чтение заголовка и базы времени
//! - статистику отбракованных кадров
//!
//! Запуск: `cargo run -p sonar-core --example read_sonar_log -- track.sl2`

use std::path::Path;

use sonar_core::decode_log;
use sonar_types::FormatVariant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args().nth(1).unwrap_or_else(|| "track.sl2".to_string());
    let variant = Path::new(&input)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(FormatVariant::from_extension)
        .ok_or_else(|| format!("cannot infer format variant from '{input}'"))?;

    let buf = std::fs::read(&input)?;
    let log = decode_log(&buf, variant)?;

    println!("✓ Header read");
    println!("  Variant       : {}", log.variant);
    println!("  Version       : {}", log.header.version);
    println!("  Device id     : {}", log.header.device_id);
    println!("  Time base     : {:?}", log.time_base);

    let s = &log.stats;
    println!("\n✓ Decode complete");
    println!("  Frames scanned   : {}", s.frames_scanned);
    println!("  Records accepted : {}", s.records_accepted);
    println!("  Secondary channel: {}", s.rejected_secondary_channel);
    println!("  No GPS fix       : {}", s.rejected_no_fix);
    println!("  Scan end         : {:?}", s.scan_end);

    println!("\nFirst records:");
    for (i, r) in log.records.iter().take(3).enumerate() {
        println!(
            "  [{i}] {} lat={:.7} lon={:.7} depth={:.2} m density={}",
            r.timestamp().to_rfc3339(),
            r.latitude(),
            r.longitude(),
            r.water_depth(),
            r.bottom_density_1()
        );
    }

    Ok(())
}
