//! Path: native/game_sim/src/logging.rs
//! Summary: env_logger の初期化（RUST_LOG があればそちらを優先）とデバッグ用パニックフック

use env_logger::Env;

/// 二重初期化は無視する
pub fn init(verbose: bool) {
    #[cfg(debug_assertions)]
    init_panic_hook();
    let default = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default)).try_init();
}

/// デバッグビルド時のみ: パニック時にバックトレースを stderr に出力する
#[cfg(debug_assertions)]
fn init_panic_hook() {
    let default = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("Backtrace:\n{}", std::backtrace::Backtrace::force_capture());
        default(info);
    }));
}
