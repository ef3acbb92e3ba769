use backtrace::Backtrace;
use fern::{Dispatch, Output};
use log::{LevelFilter, Record};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rht_openvr::DriverLog;
use std::sync::{Arc, Once};

// The host log only exists between Provider::Init and Provider::Cleanup
static HOST_LOG: Lazy<RwLock<Option<Arc<dyn DriverLog>>>> = Lazy::new(|| RwLock::new(None));

pub fn attach_host_log(log: Arc<dyn DriverLog>) {
    *HOST_LOG.write() = Some(log);
}

pub fn detach_host_log() {
    *HOST_LOG.write() = None;
}

fn write_to_sink(sink: &dyn DriverLog, record: &Record) {
    sink.log(&format!("{}\n", record.args()));
}

fn forward_to_host(record: &Record) {
    if let Some(sink) = &*HOST_LOG.read() {
        write_to_sink(sink.as_ref(), record);
    }
}

pub fn init_logging() {
    static INIT_LOGGING_ENTRY_POINT: Once = Once::new();

    INIT_LOGGING_ENTRY_POINT.call_once(|| {
        if cfg!(debug_assertions) {
            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{}] At {}:{}: {}",
                        record.level(),
                        record.file().unwrap_or_default(),
                        record.line().unwrap_or_default(),
                        message
                    ))
                })
                .level(LevelFilter::Debug)
        } else {
            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("[{}] {}", record.level(), message))
                })
                .level(LevelFilter::Info)
        }
        .chain(Output::call(forward_to_host))
        .apply()
        .ok();

        set_panic_hook();
    });
}

// Panics go to the host log first, then to the previous hook
fn set_panic_hook() {
    let previous_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!(
            "What happened:\n{panic_info}\n\nBacktrace:\n{:?}",
            Backtrace::new()
        );

        previous_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl DriverLog for Lines {
        fn log(&self, message: &str) {
            self.0.lock().push(message.into());
        }
    }

    #[test]
    fn records_are_written_as_lines() {
        let lines = Lines::default();

        write_to_sink(
            &lines,
            &Record::builder()
                .args(format_args!("[INFO] HMD found"))
                .level(Level::Info)
                .build(),
        );

        assert_eq!(*lines.0.lock(), ["[INFO] HMD found\n"]);
    }
}
