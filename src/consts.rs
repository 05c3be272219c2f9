use crate::error::LogError;

/// chunk length used when streaming the active file through a compressor
pub const CHUNK_LEN: usize = 500;

/// suffix of the staging file a background rotation hands to the saver thread
pub const PENDING_SUFFIX: &str = ".pending";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogSize {
    B(usize),
    KB(usize),
    MB(usize),
    GB(usize),
    TB(usize),
    EB(usize),
}

impl LogSize {
    /// length in bytes, saturating at usize::MAX
    pub fn get_len(&self) -> usize {
        let (n, shift) = match self {
            Self::B(b) => (*b, 0),
            Self::KB(kb) => (*kb, 1),
            Self::MB(mb) => (*mb, 2),
            Self::GB(gb) => (*gb, 3),
            Self::TB(tb) => (*tb, 4),
            Self::EB(eb) => (*eb, 5),
        };
        (0..shift).fold(n, |len, _| len.saturating_mul(1024))
    }

    /// parse `"100"`, `"100B"`, `"10KB"`, `"1 MB"` ...
    pub fn parse(arg: &str) -> Result<Self, LogError> {
        let arg = arg.trim().to_uppercase();
        let split = arg
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(arg.len());
        let (num, unit) = arg.split_at(split);
        let num: usize = num
            .parse()
            .map_err(|_| LogError::from(format!("[roll_log] bad log size: '{}'", arg)))?;
        match unit.trim() {
            "" | "B" => Ok(Self::B(num)),
            "KB" => Ok(Self::KB(num)),
            "MB" => Ok(Self::MB(num)),
            "GB" => Ok(Self::GB(num)),
            "TB" => Ok(Self::TB(num)),
            "EB" => Ok(Self::EB(num)),
            other => Err(LogError::from(format!(
                "[roll_log] unknown log size unit: '{}'",
                other
            ))),
        }
    }
}

impl From<usize> for LogSize {
    fn from(arg: usize) -> Self {
        LogSize::B(arg)
    }
}
