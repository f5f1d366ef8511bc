//! Roots file parsing.
//!
//! One identity per line; blank lines and `#` comments are ignored. Unlike
//! seeds discovered mid-traversal, a malformed root is an input error and
//! aborts startup: silently dropping a root the operator asked for would
//! make the run look complete when it is not.

use anyhow::{bail, Context};
use layermap_types::Identity;
use std::path::Path;

/// Load traversal roots from a file.
pub fn load_roots(path: &Path) -> anyhow::Result<Vec<Identity>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading roots file {}", path.display()))?;
    parse_roots(&contents).with_context(|| format!("in roots file {}", path.display()))
}

fn parse_roots(contents: &str) -> anyhow::Result<Vec<Identity>> {
    let mut roots = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let identity = Identity::parse(line)
            .with_context(|| format!("line {}: {line:?}", idx + 1))?;
        roots.push(identity);
    }
    if roots.is_empty() {
        bail!("no root identities found");
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(c: char) -> String {
        c.to_string().repeat(Identity::LEN)
    }

    #[test]
    fn parses_identities_skipping_comments_and_blanks() {
        let contents = format!(
            "# traversal roots\n\n{}\n  {}  \n# trailing comment\n",
            id('A'),
            id('B')
        );
        let roots = parse_roots(&contents).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].to_string(), id('A'));
        assert_eq!(roots[1].to_string(), id('B'));
    }

    #[test]
    fn malformed_line_is_an_error_with_line_number() {
        let contents = format!("{}\nnot-an-identity\n", id('A'));
        let err = parse_roots(&contents).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(parse_roots("# only comments\n\n").is_err());
    }
}
