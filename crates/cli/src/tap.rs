/// TAP (Test Anything Protocol) v14 output.
/// Writes to stdout.
pub(crate) struct Tap {
    tests: Vec<TapTest>,
}

struct TapTest {
    ok: bool,
    desc: String,
    diagnostics: Option<String>,
}

impl Tap {
    pub fn new() -> Self {
        Tap { tests: Vec::new() }
    }

    pub fn ok(&mut self, desc: impl Into<String>) {
        self.tests.push(TapTest {
            ok: true,
            desc: desc.into(),
            diagnostics: None,
        });
    }

    pub fn not_ok(&mut self, desc: impl Into<String>, diagnostics: impl Into<String>) {
        self.tests.push(TapTest {
            ok: false,
            desc: desc.into(),
            diagnostics: Some(diagnostics.into()),
        });
    }

    /// Render the whole report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("TAP version 14\n");
        out.push_str(&format!("1..{}\n", self.tests.len()));
        for (i, t) in self.tests.iter().enumerate() {
            let n = i + 1;
            if t.ok {
                out.push_str(&format!("ok {} - {}\n", n, t.desc));
            } else {
                out.push_str(&format!("not ok {} - {}\n", n, t.desc));
                if let Some(diag) = &t.diagnostics {
                    for line in diag.lines() {
                        out.push_str(&format!("  # {}\n", line));
                    }
                }
            }
        }
        let fail = self.failure_count();
        out.push_str(&format!("# tests {}\n", self.tests.len()));
        out.push_str(&format!("# pass  {}\n", self.tests.len() - fail));
        out.push_str(&format!("# fail  {}\n", fail));
        out
    }

    pub fn finish(self) {
        print!("{}", self.render());
    }

    pub fn failure_count(&self) -> usize {
        self.tests.iter().filter(|t| !t.ok).count()
    }
}
