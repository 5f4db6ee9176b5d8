//! Logging macros shared by the core modules.
//!
//! - With the `defmt` feature (firmware builds): forwards to `defmt`.
//! - Host tests: prints to stdout.
//! - Anything else: no-op.
//!
//! Format strings must stay within the subset both `defmt` and `core::fmt`
//! accept: `{}` for integers and `{:?}` for the crate's enums.

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::info!($($arg)*);

        #[cfg(test)]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::debug!($($arg)*);

        #[cfg(test)]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::warn!($($arg)*);

        #[cfg(test)]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
