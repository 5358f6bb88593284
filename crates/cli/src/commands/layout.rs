// `collabwrite layout`: show or change a document's page layout.

use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_common::types::{PageDimensions, PageLayout};

use crate::context::{AppContext, CommonArgs};

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    /// New layout: auto, A1, A2, A3, A4, or A5.
    pub layout: Option<PageLayout>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResult {
    pub doc_id: String,
    pub layout: PageLayout,
    pub dimensions: Option<PageDimensions>,
    pub changed: bool,
}

pub fn run(args: LayoutArgs) -> anyhow::Result<()> {
    super::run_with_context(
        &args.common,
        |ctx| execute(ctx, &args.doc, args.layout),
        format_human,
    )?;
    Ok(())
}

fn execute(
    ctx: &AppContext,
    doc_id: &str,
    layout: Option<PageLayout>,
) -> anyhow::Result<LayoutResult> {
    let (_, mut session) = ctx.open_document(doc_id)?;
    let changed = match layout {
        Some(layout) if layout != session.layout() => {
            session.set_layout(layout);
            ctx.save_session(&session)?;
            true
        }
        _ => false,
    };

    Ok(LayoutResult {
        doc_id: doc_id.to_string(),
        layout: session.layout(),
        dimensions: session.layout().dimensions(),
        changed,
    })
}

fn format_human(result: &LayoutResult) -> String {
    let size = match result.dimensions {
        Some(PageDimensions { width, height }) => format!("{width}x{height}px"),
        None => "natural size".to_string(),
    };
    let verb = if result.changed { "set to" } else { "is" };
    format!("Layout for {} {verb} {} ({size})", result.doc_id, result.layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::temp_context;

    #[test]
    fn defaults_to_auto() {
        let (_dir, ctx) = temp_context();
        let result = execute(&ctx, "1", None).unwrap();
        assert_eq!(result.layout, PageLayout::Auto);
        assert_eq!(result.dimensions, None);
        assert!(!result.changed);
    }

    #[test]
    fn change_is_persisted() {
        let (_dir, ctx) = temp_context();
        let result = execute(&ctx, "1", Some(PageLayout::A4)).unwrap();
        assert!(result.changed);
        assert_eq!(result.dimensions, Some(PageDimensions { width: 794, height: 1123 }));

        let again = execute(&ctx, "1", Some(PageLayout::A4)).unwrap();
        assert!(!again.changed);
        assert_eq!(again.layout, PageLayout::A4);
    }

    #[test]
    fn human_format() {
        let (_dir, ctx) = temp_context();
        let result = execute(&ctx, "2", Some(PageLayout::A5)).unwrap();
        assert_eq!(format_human(&result), "Layout for 2 set to A5 (559x794px)");
        let result = execute(&ctx, "3", None).unwrap();
        assert_eq!(format_human(&result), "Layout for 3 is auto (natural size)");
    }
}
