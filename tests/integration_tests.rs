//! Integration tests for gridmark block and document rendering

use gridmark::{
    apply_image_action, build_layout, inject_content, locate_image, parse_grid, render_block,
    render_document, rewrite_image_line, rewrite_modifiers, GridError, GridResult, ImageAction,
    LineEditor, MemoryDocument, ModifierKeywords, PulldownRenderer, RenderContext, RenderOptions,
    SlotContent,
};
use pretty_assertions::assert_eq;

fn upper(md: &str, _source: &str) -> GridResult<String> {
    Ok(md.to_uppercase())
}

// ============================================================================
// Parsing
// ============================================================================

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_cell_address() {
        let grid = parse_grid("grid-settings\nrows: 2\ncolumns: 2\n\n=== cell A1 ===\nhello");
        assert_eq!(grid.cells.len(), 1);
        assert_eq!((grid.cells[0].row, grid.cells[0].column), (0, 0));
        assert_eq!(grid.cells[0].content, "hello");
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let blocks = [
            "grid-settings\ncolumns: 4\nrows: 3\nshow-borders: false\ncell-height: 150px",
            "grid-settings\ncolumns: zero\nrows: -1\ndynamic-height: yes",
            "grid-settings\ncolumns: 0\ninvisible-mode: true\ncol-widths: 1fr 2fr",
            "grid-settings\nrow-heights: auto 100px\nshow-borders: TRUE",
        ];
        for block in blocks {
            let first = parse_grid(block).settings;
            let second = parse_grid(&first.to_settings_block()).settings;
            assert_eq!(first, second, "settings changed on reparse of {:?}", block);
        }
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let settings = parse_grid("grid-settings\ncolumns: lots\nrows: 0\nshow-borders: yes").settings;
        assert_eq!(settings.columns, 2);
        assert_eq!(settings.rows, 2);
        assert!(!settings.show_borders);
    }

    #[test]
    fn test_empty_block() {
        let grid = parse_grid("");
        assert!(grid.cells.is_empty());
        assert_eq!((grid.settings.columns, grid.settings.rows), (2, 2));
    }

    #[test]
    fn test_text_before_markers_is_dropped() {
        let grid = parse_grid("stray text\n=== start-grid: x\n=== cell B2 ===\nbody\n=== end-grid");
        assert_eq!(grid.cells.len(), 1);
        assert_eq!(grid.cells[0].content, "body");
    }

    #[test]
    fn test_duplicate_cells_last_wins() {
        let grid = parse_grid("=== cell A1 ===\nfirst\n=== cell A1 ===\nsecond");
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.cell("A1").map(|c| c.content.as_str()), Some("second"));
    }
}

// ============================================================================
// Layout
// ============================================================================

mod layout {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slot_count_is_rows_times_columns() {
        for (columns, rows) in [(1, 1), (2, 3), (5, 2), (26, 1)] {
            let block = format!("grid-settings\ncolumns: {}\nrows: {}\n\n=== cell A1 ===\nx", columns, rows);
            let grid = parse_grid(&block);
            let layout = build_layout(&grid.settings, &grid.cells, &RenderContext::default());
            assert_eq!(layout.slots.len(), columns * rows);

            let mut ids: Vec<&str> = layout.slots.iter().map(|s| s.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), columns * rows);
        }
    }

    #[test]
    fn test_out_of_range_cell_is_not_placed() {
        let grid = parse_grid("grid-settings\ncolumns: 3\nrows: 1\n\n=== cell A1 ===\nx\n=== cell D1 ===\ny");
        assert_eq!(grid.cells.len(), 2);

        let mut layout = build_layout(&grid.settings, &grid.cells, &RenderContext::default());
        let ids: Vec<&str> = layout.slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "B1", "C1"]);

        inject_content(&mut layout, &grid.cells, "a.md", &upper).unwrap();
        assert_eq!(
            layout.slot("A1").map(|s| s.content.clone()),
            Some(SlotContent::Rendered("X".to_string()))
        );
        assert!(layout.slot("D1").is_none());
        assert!(!layout.to_html().contains('Y'));
    }

    #[test]
    fn test_invisible_from_context() {
        let grid = parse_grid("=== cell A1 ===\nx");
        let layout = build_layout(&grid.settings, &grid.cells, &RenderContext::invisible());
        assert!(layout.has_class("grid-invisible"));
    }
}

// ============================================================================
// Block rendering
// ============================================================================

mod block_rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_images_in_three_column_grid() {
        let input = "grid-settings\ncolumns: 3\nrows: 1\n\n=== cell A1 ===\n![[pic.png]]";
        let layout = render_block(
            input,
            "notes/day.md",
            &RenderOptions::default(),
            &RenderContext::default(),
            &PulldownRenderer::new(),
        );
        let html = match &layout.slot("A1").map(|s| &s.content) {
            Some(SlotContent::Rendered(html)) => html.clone(),
            other => panic!("A1 not rendered: {:?}", other),
        };
        assert!(html.contains(r#"src="notes/pic.png""#));
        assert!(html.contains("grid-img-3col"));
        assert!(html.contains("onerror="));
    }

    #[test]
    fn test_failure_keeps_partial_layout() {
        let failing = |md: &str, _: &str| -> GridResult<String> {
            if md == "bad" {
                Err(GridError::render("nope"))
            } else {
                Ok(md.to_string())
            }
        };
        let layout = render_block(
            "=== cell A1 ===\nok\n=== cell B1 ===\nbad\n=== cell A2 ===\nlater",
            "a.md",
            &RenderOptions::default(),
            &RenderContext::default(),
            &failing,
        );
        assert_eq!(
            layout.slot("A1").map(|s| s.content.clone()),
            Some(SlotContent::Rendered("ok".to_string()))
        );
        assert_eq!(layout.slot("B1").map(|s| s.content.clone()), Some(SlotContent::Pending));
        assert_eq!(layout.slot("A2").map(|s| s.content.clone()), Some(SlotContent::Pending));
    }

    #[test]
    fn test_output_is_deterministic() {
        let input = "grid-settings\ncolumns: 2\nrows: 2\n\n=== cell B2 ===\n*b*\n=== cell A1 ===\n# a";
        let render = || {
            render_block(
                input,
                "a.md",
                &RenderOptions::default(),
                &RenderContext::default(),
                &PulldownRenderer::new(),
            )
            .to_html()
        };
        assert_eq!(render(), render());
    }
}

// ============================================================================
// Document rendering
// ============================================================================

mod documents {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_grids_and_prose() {
        let md = "Before\n\n```grid\n=== cell A1 ===\none\n```\n\nMiddle\n\n```grid\n=== cell B1 ===\ntwo\n```\n\nAfter\n";
        let out = render_document(md, "a.md", &RenderOptions::default(), &RenderContext::default());
        assert_eq!(out.content.matches("grid-container").count(), 2);
        let before = out.content.find("Before").unwrap();
        let middle = out.content.find("Middle").unwrap();
        let after = out.content.find("After").unwrap();
        let one = out.content.find("<p>one</p>").unwrap();
        let two = out.content.find("<p>two</p>").unwrap();
        assert!(before < one && one < middle && middle < two && two < after);
    }

    #[test]
    fn test_out_of_range_cell_is_reported() {
        let md = "```grid\ngrid-settings\ncolumns: 1\nrows: 1\n\n=== cell B1 ===\nlost\n```\n";
        let out = render_document(md, "a.md", &RenderOptions::default(), &RenderContext::default());
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].message.contains("B1"));
        assert!(!out.content.contains("lost"));
    }
}

// ============================================================================
// Image modifiers
// ============================================================================

mod image_modifiers {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite(line: &str, position: Option<&str>, size: Option<&str>) -> String {
        let doc = MemoryDocument::new(line);
        let found = locate_image(&doc, 0).expect("embed on line 0");
        rewrite_modifiers(&found, position, size, &ModifierKeywords::default())
    }

    #[test]
    fn test_not_found_three_lines_below() {
        let doc = MemoryDocument::new("![[pic.png]]\na\nb\ncursor");
        assert!(locate_image(&doc, 3).is_none());
        assert!(locate_image(&doc, 2).is_some());
    }

    #[test]
    fn test_position_replaced_size_kept() {
        assert_eq!(
            rewrite("![[pic.png|left|small]]", Some("right"), None),
            "![[pic.png|right|small]]"
        );
    }

    #[test]
    fn test_clear_position_keeps_size() {
        assert_eq!(
            rewrite("![[pic.png|left|medium]]", Some("clear"), None),
            "![[pic.png|medium]]"
        );
        assert_eq!(
            rewrite("![[pic.png|left|medium]]", Some("clear"), Some("clear")),
            "![[pic.png]]"
        );
    }

    #[test]
    fn test_unrecognized_modifiers_survive() {
        for (position, size) in [
            (Some("center"), None),
            (None, Some("large")),
            (Some("clear"), Some("clear")),
            (Some("float-left"), Some("small")),
        ] {
            let out = rewrite("see ![[pic.png|caption=foo|left|400]] here", position, size);
            assert!(out.contains("|caption=foo"), "{}", out);
            assert!(out.contains("|400"), "{}", out);
            assert!(out.starts_with("see ![[pic.png|"));
            assert!(out.ends_with("]] here"));
        }
    }

    #[test]
    fn test_apply_action_edits_document() {
        let mut doc = MemoryDocument::new("# Notes\n\n![[cat.jpg|small]]\ntext\n");
        let found = apply_image_action(
            &mut doc,
            3,
            &ImageAction::Position("float-right".to_string()),
            &ModifierKeywords::default(),
        )
        .unwrap();
        assert_eq!(found.line, 2);
        assert_eq!(doc.line(2), Some("![[cat.jpg|small|float-right]]"));
        assert_eq!(doc.text(), "# Notes\n\n![[cat.jpg|small|float-right]]\ntext\n");
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = ModifierKeywords::new(["top", "bottom"], ["tiny"]);
        let doc = MemoryDocument::new("![[pic.png|left|top|tiny]]");
        let found = locate_image(&doc, 0).unwrap();
        assert_eq!(
            rewrite_modifiers(&found, Some("bottom"), Some("clear"), &keywords),
            "![[pic.png|left|bottom]]"
        );
    }

    #[test]
    fn test_rewrite_image_line_not_found() {
        let err = rewrite_image_line("no images here", 0, &ImageAction::Clear).unwrap_err();
        assert_eq!(err.to_string(), "No image found near line 1");
    }
}
