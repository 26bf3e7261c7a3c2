const INDENT: &str = "    ";

/// Line-oriented text builder with brace-tracking indentation.
#[derive(Debug, Default)]
pub struct Printer {
    buf: String,
    depth: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for l in lines {
            self.line(l);
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    pub fn open(&mut self) -> &mut Self {
        self.line("{").indent()
    }

    pub fn close(&mut self) -> &mut Self {
        self.dedent().line("}")
    }

    /// Writes `text` one level deeper than the current line.
    pub fn indented<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        self.indent().line(text).dedent()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
