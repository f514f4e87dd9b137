use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use pastebin_core::{IdentifierSource, PasteId, PasteService};
use pastebin_store::KeyValueStore;
use tracing::info;

/// Content from `file`, or all of stdin when no file is given.
pub fn read_content(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            Ok(content)
        }
    }
}

pub fn create<S, I>(
    service: &PasteService<S, I>,
    content: String,
    private: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    I: IdentifierSource,
{
    let paste = service.submit(content, private)?;
    info!(id = %paste.id, private, "paste created");
    writeln!(out, "{}", paste.id)?;
    Ok(())
}

pub fn show<S, I>(
    service: &PasteService<S, I>,
    id: &str,
    raw: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    I: IdentifierSource,
{
    let id = PasteId::parse(id)?;
    let paste = service.load(&id)?;
    if !raw {
        writeln!(out, "{paste}")?;
    }
    write!(out, "{}", paste.content)?;
    if !raw && !paste.content.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

pub fn edit<S, I>(
    service: &PasteService<S, I>,
    id: &str,
    content: String,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    I: IdentifierSource,
{
    let id = PasteId::parse(id)?;
    let paste = service.update(&id, content)?;
    info!(id = %paste.id, "paste updated");
    writeln!(out, "{}", paste.id)?;
    Ok(())
}
