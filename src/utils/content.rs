/// Bytes inspected when classifying content
const SAMPLE_SIZE: usize = 8192;

/// Check if content is likely binary
pub fn is_binary(content: &[u8]) -> bool {
    let sample_size = content.len().min(SAMPLE_SIZE);
    if sample_size == 0 {
        return false;
    }
    let sample = &content[..sample_size];

    // Check for null bytes
    let null_count = memchr::memchr_iter(0, sample).count();
    if null_count > sample_size / 10 {
        return true;
    }

    // Check for high proportion of non-text bytes
    let non_text_count = sample
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    non_text_count > sample_size / 8
}

/// Line starts of `content`, for turning byte offsets into line numbers
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &[u8]) -> Self {
        let mut starts = vec![0];
        starts.extend(memchr::memchr_iter(b'\n', content).map(|i| i + 1));
        Self { starts }
    }

    /// 1-based line number containing byte `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        // starts[0] == 0, so partition_point is at least 1
        self.starts.partition_point(|&start| start <= offset)
    }
}
