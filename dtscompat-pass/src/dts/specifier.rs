//! Relative specifier rewriting for declaration files.
//!
//! A candidate is the `from` keyword of an `import ... from` or
//! `export ... from` clause followed by a string quoted with `"` or `'` on
//! one line. Only the opening quote character ends the string, so a path
//! may contain the other one.
//!
//! A candidate is rewritten when its path is relative, ends in one of the
//! recognized source extensions, and is not already a `.d.ts` path. The
//! query suffix and quote style are kept; everything else in the text is
//! copied through byte for byte.

use std::{ops::Range, sync::LazyLock};

use dtscompat_core::{DECLARATION_EXTENSION, SourceExtension};
use regex::{Captures, Regex};

static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<intro>\bfrom\s+)(?:"(?P<dq>[^"\r\n]*)"|'(?P<sq>[^'\r\n]*)')"#,
    )
    .expect("specifier pattern is valid")
});

/// A rewritable specifier found in declaration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierMatch<'a> {
    /// Byte range of the whole occurrence, introducer through closing quote.
    pub range: Range<usize>,
    /// Keyword and whitespace preceding the quote.
    pub introducer: &'a str,
    /// Quote character used on both sides.
    pub quote: char,
    /// Module path without its extension.
    pub stem: &'a str,
    /// The recognized extension being replaced.
    pub extension: SourceExtension,
    /// Query suffix including the leading `?`, if present.
    pub query: Option<&'a str>,
}

impl SpecifierMatch<'_> {
    /// The specifier text between the quotes after rewriting.
    pub fn specifier(&self) -> String {
        format!(
            "{}{}{}",
            self.stem,
            DECLARATION_EXTENSION,
            self.query.unwrap_or_default()
        )
    }

    /// The full replacement for [`Self::range`].
    pub fn replacement(&self) -> String {
        format!(
            "{}{quote}{}{quote}",
            self.introducer,
            self.specifier(),
            quote = self.quote
        )
    }
}

/// Result of rewriting one declaration file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten text.
    pub text: String,
    /// Number of specifiers that were changed.
    pub count: usize,
}

impl Rewrite {
    /// Whether any specifier was changed.
    pub fn changed(&self) -> bool {
        self.count > 0
    }
}

/// Find every rewritable specifier in `text`, in order of appearance.
pub fn scan(text: &str) -> Vec<SpecifierMatch<'_>> {
    CANDIDATE
        .captures_iter(text)
        .filter_map(|caps| classify(&caps))
        .collect()
}

/// Rewrite every relative source-extension specifier to `.d.ts`.
///
/// Applying this to its own output changes nothing.
pub fn rewrite(text: &str) -> Rewrite {
    let matches = scan(text);
    if matches.is_empty() {
        return Rewrite {
            text: text.to_string(),
            count: 0,
        };
    }

    let mut out = String::with_capacity(text.len() + matches.len() * 2);
    let mut last = 0;
    for m in &matches {
        out.push_str(&text[last..m.range.start]);
        out.push_str(&m.replacement());
        last = m.range.end;
    }
    out.push_str(&text[last..]);

    Rewrite {
        text: out,
        count: matches.len(),
    }
}

fn classify<'a>(caps: &Captures<'a>) -> Option<SpecifierMatch<'a>> {
    let whole = caps.get(0)?;
    let (quote, body) = match (caps.name("dq"), caps.name("sq")) {
        (Some(body), _) => ('"', body.as_str()),
        (None, Some(body)) => ('\'', body.as_str()),
        (None, None) => return None,
    };

    let (path, query) = match body.find('?') {
        Some(at) => (&body[..at], Some(&body[at..])),
        None => (body, None),
    };
    if !is_relative(path) {
        return None;
    }
    let (stem, extension) = SourceExtension::split(path)?;

    Some(SpecifierMatch {
        range: whole.range(),
        introducer: caps.name("intro")?.as_str(),
        quote,
        stem,
        extension,
        query,
    })
}

fn is_relative(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(text: &str) -> String {
        rewrite(text).text
    }

    #[test]
    fn test_rewrites_ts_specifier() {
        assert_eq!(
            rewritten(r#"import { a } from "./x.ts";"#),
            r#"import { a } from "./x.d.ts";"#
        );
    }

    #[test]
    fn test_keeps_query_suffix() {
        assert_eq!(
            rewritten(r#"import raw from "./x.ts?raw";"#),
            r#"import raw from "./x.d.ts?raw";"#
        );
    }

    #[test]
    fn test_every_source_extension() {
        for ext in ["js", "ts", "mjs", "cjs", "tsx", "jsx"] {
            let input = format!("export * from './mod.{ext}';");
            assert_eq!(rewritten(&input), "export * from './mod.d.ts';", "{ext}");
        }
    }

    #[test]
    fn test_unrecognized_extension_untouched() {
        let input = r#"import data from "./data.json";"#;
        assert_eq!(rewritten(input), input);
    }

    #[test]
    fn test_declaration_specifier_untouched() {
        for input in [
            r#"export * from "./types.d.ts";"#,
            r#"export * from "./types.d.ts?raw";"#,
        ] {
            assert_eq!(rewritten(input), input);
        }
    }

    #[test]
    fn test_bare_and_absolute_specifiers_untouched() {
        for input in [
            r#"import { h } from "preact";"#,
            r#"import fp from "lodash/fp.js";"#,
            r#"import x from "/abs/x.js";"#,
            r#"import x from "https://esm.sh/x.js";"#,
        ] {
            assert_eq!(rewritten(input), input);
        }
    }

    #[test]
    fn test_parent_relative_specifier() {
        assert_eq!(
            rewritten(r#"export type { T } from "../shared/types.js";"#),
            r#"export type { T } from "../shared/types.d.ts";"#
        );
    }

    #[test]
    fn test_tsx_is_not_read_as_ts() {
        assert_eq!(
            rewritten(r#"export { App } from "./App.tsx";"#),
            r#"export { App } from "./App.d.ts";"#
        );
    }

    #[test]
    fn test_only_from_clauses_are_rewritten() {
        for input in [
            r#"export declare const x: import("./types.js").Foo;"#,
            r#"import './polyfill.js';"#,
            r#"/// <reference path="./globals.js" />"#,
        ] {
            assert_eq!(rewritten(input), input);
        }
    }

    #[test]
    fn test_other_quote_inside_path() {
        assert_eq!(
            rewritten(r#"export * from "./it's.js";"#),
            r#"export * from "./it's.d.ts";"#
        );
        assert_eq!(
            rewritten(r#"export * from './say "hi".ts';"#),
            r#"export * from './say "hi".d.ts';"#
        );
    }

    #[test]
    fn test_extension_only_file_name() {
        assert_eq!(
            rewritten(r#"export * from "./.ts";"#),
            r#"export * from "./.d.ts";"#
        );
        assert_eq!(rewritten("export * from '../.js';"), "export * from '../.d.ts';");
    }

    #[test]
    fn test_mismatched_quotes_untouched() {
        let input = r#"import a from "./a.js';"#;
        assert_eq!(rewritten(input), input);
    }

    #[test]
    fn test_keyword_needs_word_boundary_and_whitespace() {
        for input in [r#"xfrom "./a.js""#, r#"from"./a.js""#] {
            assert_eq!(rewritten(input), input);
        }
    }

    #[test]
    fn test_multiline_export_clause() {
        let input = "export {\n  a,\n  b,\n} from './ab.js';\n";
        assert_eq!(rewritten(input), "export {\n  a,\n  b,\n} from './ab.d.ts';\n");
    }

    #[test]
    fn test_idempotent() {
        let input = concat!(
            "import type { A } from './a.js';\n",
            "import type { B } from \"../b.tsx?inline\";\n",
            "export * from './c.d.ts';\n",
            "export { d } from 'd';\n",
            "export type { E } from \"./it's.mjs\";\n",
        );
        let once = rewrite(input);
        let twice = rewrite(&once.text);

        assert_eq!(once.count, 3);
        assert_eq!(twice.text, once.text);
        assert!(!twice.changed());
    }

    #[test]
    fn test_text_outside_matches_is_preserved() {
        let input = "// header\r\nimport { a } from './a.js'; /* tail */\r\n";
        assert_eq!(
            rewritten(input),
            "// header\r\nimport { a } from './a.d.ts'; /* tail */\r\n"
        );
    }

    #[test]
    fn test_scan_decomposes_match() {
        let text = r#"export * from './lib/util.mjs?v=2';"#;
        let matches = scan(text);

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.introducer, "from ");
        assert_eq!(m.quote, '\'');
        assert_eq!(m.stem, "./lib/util");
        assert_eq!(m.extension, SourceExtension::Mjs);
        assert_eq!(m.query, Some("?v=2"));
        assert_eq!(&text[m.range.clone()], "from './lib/util.mjs?v=2'");
        assert_eq!(m.specifier(), "./lib/util.d.ts?v=2");
    }

    #[test]
    fn test_no_matches_returns_input() {
        let result = rewrite("export declare function f(): void;\n");

        assert!(!result.changed());
        assert_eq!(result.text, "export declare function f(): void;\n");
    }
}
