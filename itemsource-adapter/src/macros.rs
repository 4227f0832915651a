#[cfg(feature = "tracing")]
macro_rules! adp_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "itemsource_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adp_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! adp_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "itemsource_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adp_debug {
    ($($tt:tt)*) => {};
}
