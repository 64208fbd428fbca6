/// Print a line for the human at the other end.
/// Native: `println!()`. WASM: `web_sys::console::log_1()`.
#[cfg(not(target_arch = "wasm32"))]
macro_rules! engine_println {
    ($($arg:tt)*) => { println!($($arg)*) }
}

#[cfg(target_arch = "wasm32")]
macro_rules! engine_println {
    ($($arg:tt)*) => {
        web_sys::console::log_1(&format!($($arg)*).into())
    }
}

pub(crate) use engine_println;
