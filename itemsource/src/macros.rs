#[cfg(feature = "tracing")]
macro_rules! src_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "itemsource", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! src_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! src_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "itemsource", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! src_debug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! src_warn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "itemsource", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! src_warn {
    ($($tt:tt)*) => {};
}
