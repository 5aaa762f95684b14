/// Accumulates generated C text.
///
/// Declarations go to the header and statements to the body. The header is
/// always written out first, whatever order the two were filled in.
#[derive(Debug, Default)]
pub struct Emitter {
    header: String,
    code: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, code: impl AsRef<str>) {
        self.code.push_str(code.as_ref());
    }

    pub fn emit_line(&mut self, code: impl AsRef<str>) {
        self.code.push_str(code.as_ref());
        self.code.push('\n');
    }

    pub fn header_line(&mut self, code: impl AsRef<str>) {
        self.header.push_str(code.as_ref());
        self.header.push('\n');
    }

    pub fn finalize(self) -> String {
        let mut out = self.header;
        out.push_str(&self.code);
        out
    }
}
