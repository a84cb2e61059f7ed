/// Errors from pixel buffer configuration and swizzler preparation.
///
/// Swizzle calls themselves never fail: they clamp to the capacity of the
/// slices they are given and report how many pixels they converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The pixel buffer was never successfully configured.
    #[error("bad receiver: pixel buffer is not configured")]
    BadReceiver,

    #[error("bad argument")]
    BadArgument,

    #[error("bad argument: length too short")]
    BadArgumentLengthTooShort,

    #[error("unsupported option")]
    UnsupportedOption,

    /// The destination format is excluded by the active [`DstAllowList`](crate::DstAllowList).
    #[error("disabled by configuration")]
    DisabledByConfiguration,
}
