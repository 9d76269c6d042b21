//! Stylesheet giving the generated grid classes their meaning
//!
//! Class and property names here must stay in sync with
//! [`crate::data::constants`].

/// CSS for grid containers, cells, placeholders and embedded images
pub const STYLESHEET: &str = r#".grid-container {
  display: grid;
  gap: 8px;
  width: 100%;
  margin: 1em 0;
}

.grid-cell {
  border: 1px solid var(--grid-border-color, #d0d0d0);
  border-radius: 4px;
  padding: 8px;
  overflow: auto;
  min-width: 0;
}

.grid-no-borders > .grid-cell {
  border: none;
}

.grid-dynamic-height > .grid-cell {
  overflow: visible;
}

.grid-invisible {
  gap: 0;
}

.grid-invisible > .grid-cell {
  border: none;
  background: transparent;
  padding: 0;
}

.grid-cell-empty {
  min-height: 1em;
}

.grid-cell img {
  max-width: 100%;
  height: auto;
}

.grid-img-2col {
  max-height: 320px;
  object-fit: contain;
}

.grid-img-3col {
  max-height: 220px;
  object-fit: contain;
}

.grid-img-missing {
  display: inline-block;
  padding: 4px 8px;
  color: #b00020;
  border: 1px dashed #b00020;
  font-size: 0.9em;
}

.grid-embed-left { display: block; margin-right: auto; }
.grid-embed-right { display: block; margin-left: auto; }
.grid-embed-center { display: block; margin: 0 auto; }
.grid-embed-float-left { float: left; margin: 0 1em 0.5em 0; }
.grid-embed-float-right { float: right; margin: 0 0 0.5em 1em; }
.grid-embed-small { width: 25%; }
.grid-embed-medium { width: 50%; }
.grid-embed-large { width: 100%; }
"#;
