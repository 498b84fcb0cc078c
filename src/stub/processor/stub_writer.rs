use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Result, Context};
use log::trace;

use crate::stub::types::DirectiveStyle;

/// Render the directive block documenting one identifier
pub fn render_block(style: DirectiveStyle, name: &str) -> String {
    let mut block = format!(
        ".. title:: {name}\n\
         .. lua:autoobject:: {name}\n   \
         :members:\n   \
         :special-members: __new\n   \
         :undoc-members:\n   \
         :inherited-members: __new\n"
    );
    if style == DirectiveStyle::Extended {
        block.push_str("   :inherited-members-table:\n\n");
    }
    block
}

/// Create (or truncate) `path` and write one block per identifier, in order
pub fn write_all<S: AsRef<str>>(path: impl AsRef<Path>, style: DirectiveStyle, names: &[S]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create stub file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for name in names {
        trace!("Writing stub for {} to {}", name.as_ref(), path.display());
        writer.write_all(render_block(style, name.as_ref()).as_bytes())
            .with_context(|| format!("Failed to write stub file {}", path.display()))?;
    }

    writer.flush()
        .with_context(|| format!("Failed to write stub file {}", path.display()))
}

/// Append a single block to `path`, creating the file if needed
pub fn append_block(path: impl AsRef<Path>, style: DirectiveStyle, name: &str) -> Result<()> {
    let path = path.as_ref();
    trace!("Appending stub for {} to {}", name, path.display());

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open stub file {}", path.display()))?;

    file.write_all(render_block(style, name).as_bytes())
        .with_context(|| format!("Failed to append to stub file {}", path.display()))
}
