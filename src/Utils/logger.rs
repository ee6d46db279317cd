use crate::numerical::sampling::PlotPoint;
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;

/// maps a loglevel name onto the filter; None means logging is switched off
pub fn level_filter(loglevel: &str) -> Result<Option<LevelFilter>, String> {
    match loglevel.to_lowercase().as_str() {
        "off" | "none" => Ok(None),
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        other => Err(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        )),
    }
}

/// Terminal logger, plus a log_<date>.txt file when `log_to_file` is set.
/// A logger that is already installed is kept; returns the name of the log file if one was created.
pub fn init_logger(loglevel: &str, log_to_file: bool) -> Result<Option<String>, String> {
    let Some(filter) = level_filter(loglevel)? else {
        return Ok(None);
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let mut file_name = None;
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        let file = File::create(&name).map_err(|e| format!("cannot create {}: {}", name, e))?;
        loggers.push(WriteLogger::new(filter, Config::default(), file));
        file_name = Some(name);
    }
    // a second init in the same process fails, the first logger stays active
    if CombinedLogger::init(loggers).is_err() {
        log::debug!("logger already initialised");
    }
    Ok(file_name)
}

/// saves samples as comma separated x,y rows with a header
pub fn save_samples_to_csv(points: &[PlotPoint], filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["x", "y"])?;
    for p in points {
        writer.write_record([p.x.to_string(), p.y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
