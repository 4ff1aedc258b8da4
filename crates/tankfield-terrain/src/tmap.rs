//! .tmap text map format loader and writer.
//!
//! Line oriented. Blank lines and `#` comments are ignored:
//!
//! ```text
//! tmap 1
//! size <w> <h>
//! flag <x> <y>
//! enemy <x> <y>
//! friendly <x> <y>
//! tanks <variant> <variant> ...
//! block <type> <x> <y> <w> <h>
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use glam::IVec2;
use tracing::debug;

use tankfield_core::enums::{BlockType, EnemyVariant};
use tankfield_core::error::MapError;
use tankfield_core::types::Rect;

use crate::supplier::{MapDocument, MapSupplier, MemorySupplier, Placement};

/// Format header keyword.
const TMAP_MAGIC: &str = "tmap";

/// Current format version.
const TMAP_VERSION: u32 = 1;

/// Load a map document from a .tmap file.
pub fn load_tmap(path: &Path) -> Result<MapDocument, MapError> {
    let text = std::fs::read_to_string(path)?;
    parse_tmap(&text)
}

/// Write a map document to a .tmap file.
pub fn write_tmap(document: &MapDocument, path: &Path) -> Result<(), MapError> {
    std::fs::write(path, serialize_tmap(document))?;
    Ok(())
}

/// Parse .tmap text.
pub fn parse_tmap(text: &str) -> Result<MapDocument, MapError> {
    let mut document = MapDocument::default();
    let mut seen_header = false;
    let mut seen_size = false;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        last_line = line;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let mut fields = content.split_whitespace();
        let keyword = fields.next().unwrap_or("");
        let args: Vec<&str> = fields.collect();

        if !seen_header {
            if keyword != TMAP_MAGIC {
                return Err(parse_error(line, "missing `tmap` header"));
            }
            let version: u32 = parse_number(line, &args, 0)?;
            if version != TMAP_VERSION {
                return Err(parse_error(line, format!("unsupported version {version}")));
            }
            seen_header = true;
            continue;
        }

        match keyword {
            "size" => {
                expect_arity(line, keyword, &args, 2)?;
                document.size = parse_point(line, &args)?;
                seen_size = true;
            }
            "flag" => {
                expect_arity(line, keyword, &args, 2)?;
                document.objective = parse_point(line, &args)?;
            }
            "enemy" => {
                expect_arity(line, keyword, &args, 2)?;
                document.enemy_starts.push(parse_point(line, &args)?);
            }
            "friendly" => {
                expect_arity(line, keyword, &args, 2)?;
                document.friendly_starts.push(parse_point(line, &args)?);
            }
            "tanks" => {
                for name in &args {
                    let variant = EnemyVariant::from_name(name)
                        .ok_or_else(|| parse_error(line, format!("unknown tank variant `{name}`")))?;
                    document.enemy_tanks.push(variant);
                }
            }
            "block" => {
                expect_arity(line, keyword, &args, 5)?;
                let block = BlockType::from_name(args[0])
                    .ok_or_else(|| parse_error(line, format!("unknown block type `{}`", args[0])))?;
                let rect = Rect::new(
                    parse_number(line, &args, 1)?,
                    parse_number(line, &args, 2)?,
                    parse_number(line, &args, 3)?,
                    parse_number(line, &args, 4)?,
                );
                document.placements.push(Placement { rect, block });
            }
            other => return Err(parse_error(line, format!("unknown directive `{other}`"))),
        }
    }

    if !seen_header {
        return Err(parse_error(last_line, "missing `tmap` header"));
    }
    if !seen_size {
        return Err(parse_error(last_line, "missing `size` directive"));
    }
    Ok(document)
}

/// Render a map document as .tmap text.
pub fn serialize_tmap(document: &MapDocument) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{TMAP_MAGIC} {TMAP_VERSION}");
    let _ = writeln!(out, "size {} {}", document.size.x, document.size.y);
    let _ = writeln!(out, "flag {} {}", document.objective.x, document.objective.y);
    for p in &document.enemy_starts {
        let _ = writeln!(out, "enemy {} {}", p.x, p.y);
    }
    for p in &document.friendly_starts {
        let _ = writeln!(out, "friendly {} {}", p.x, p.y);
    }
    if !document.enemy_tanks.is_empty() {
        let names: Vec<&str> = document.enemy_tanks.iter().map(|v| v.name()).collect();
        let _ = writeln!(out, "tanks {}", names.join(" "));
    }
    for placement in &document.placements {
        let r = placement.rect;
        let _ = writeln!(
            out,
            "block {} {} {} {} {}",
            placement.block.name(),
            r.left(),
            r.top(),
            r.width(),
            r.height()
        );
    }
    out
}

/// Supplier reading a .tmap file on `open`.
#[derive(Debug, Clone)]
pub struct TmapFileSupplier {
    path: PathBuf,
    inner: Option<MemorySupplier>,
}

impl TmapFileSupplier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MapSupplier for TmapFileSupplier {
    fn open(&mut self) -> Result<(), MapError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| MapError::Unavailable {
            reason: format!("{}: {e}", self.path.display()),
        })?;
        let document = parse_tmap(&text)?;
        debug!(
            path = %self.path.display(),
            placements = document.placements.len(),
            "tmap opened"
        );
        let mut inner = MemorySupplier::new(document);
        inner.open()?;
        self.inner = Some(inner);
        Ok(())
    }

    fn dimensions(&self) -> IVec2 {
        self.inner
            .as_ref()
            .map(|s| s.dimensions())
            .unwrap_or_default()
    }

    fn has_next(&self) -> bool {
        self.inner.as_ref().is_some_and(|s| s.has_next())
    }

    fn next_placement(&mut self) -> Option<Placement> {
        self.inner.as_mut()?.next_placement()
    }

    fn enemy_composition(&self) -> Vec<EnemyVariant> {
        self.inner
            .as_ref()
            .map(|s| s.enemy_composition())
            .unwrap_or_default()
    }

    fn enemy_start_positions(&self) -> Vec<IVec2> {
        self.inner
            .as_ref()
            .map(|s| s.enemy_start_positions())
            .unwrap_or_default()
    }

    fn friendly_start_positions(&self) -> Vec<IVec2> {
        self.inner
            .as_ref()
            .map(|s| s.friendly_start_positions())
            .unwrap_or_default()
    }

    fn objective_position(&self) -> IVec2 {
        self.inner
            .as_ref()
            .map(|s| s.objective_position())
            .unwrap_or_default()
    }
}

fn parse_error(line: usize, reason: impl Into<String>) -> MapError {
    MapError::Parse {
        line,
        reason: reason.into(),
    }
}

fn expect_arity(line: usize, keyword: &str, args: &[&str], arity: usize) -> Result<(), MapError> {
    if args.len() != arity {
        return Err(parse_error(
            line,
            format!("`{keyword}` takes {arity} arguments, got {}", args.len()),
        ));
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(line: usize, args: &[&str], at: usize) -> Result<T, MapError> {
    let raw = args
        .get(at)
        .ok_or_else(|| parse_error(line, "missing number"))?;
    raw.parse()
        .map_err(|_| parse_error(line, format!("bad number `{raw}`")))
}

fn parse_point(line: usize, args: &[&str]) -> Result<IVec2, MapError> {
    Ok(IVec2::new(
        parse_number(line, args, 0)?,
        parse_number(line, args, 1)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Board;

    const SAMPLE: &str = "\
# two bricks and a pond
tmap 1
size 20 15
flag 8 13
enemy 0 0
enemy 18 0
friendly 5 13

tanks regular armored speedy
block brick 2 2 4 1
block water 10 5 3 3   # pond
";

    #[test]
    fn test_parse_sample() {
        let doc = parse_tmap(SAMPLE).unwrap();
        assert_eq!(doc.size, IVec2::new(20, 15));
        assert_eq!(doc.objective, IVec2::new(8, 13));
        assert_eq!(doc.enemy_starts, vec![IVec2::new(0, 0), IVec2::new(18, 0)]);
        assert_eq!(doc.friendly_starts, vec![IVec2::new(5, 13)]);
        assert_eq!(
            doc.enemy_tanks,
            vec![EnemyVariant::Regular, EnemyVariant::Armored, EnemyVariant::Speedy]
        );
        assert_eq!(doc.placements.len(), 2);
        assert_eq!(doc.placements[1].block, BlockType::Water);
        assert_eq!(doc.placements[1].rect, Rect::new(10, 5, 3, 3));
    }

    #[test]
    fn test_serialized_text_parses_back() {
        let doc = parse_tmap(SAMPLE).unwrap();
        let text = serialize_tmap(&doc);
        assert!(text.starts_with("tmap 1\n"));
        assert_eq!(parse_tmap(&text).unwrap(), doc);
    }

    #[test]
    fn test_bad_header() {
        let err = parse_tmap("map 1\nsize 4 4\n").unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 1, .. }));

        let err = parse_tmap("tmap 9\n").unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_tmap("tmap 1\nsize 10 10\nblock lava 0 0 1 1\n").unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 3, .. }));

        let err = parse_tmap("tmap 1\nsize 10\n").unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 2, .. }));

        let err = parse_tmap("tmap 1\nsize 10 10\nteleport 1 2\n").unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_missing_size() {
        let err = parse_tmap("tmap 1\nflag 1 1\n").unwrap_err();
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn test_huge_values_load_without_overflow() {
        let doc = parse_tmap("tmap 1\nsize 1500000000 10\nflag 1 1\nblock brick 1500000000 0 1 1\n")
            .unwrap();
        let mut board = Board::new();
        board
            .load(&mut crate::supplier::MemorySupplier::new(doc))
            .unwrap();
        assert_eq!(board.size(), IVec2::new(1024, 20));
    }

    #[test]
    fn test_file_supplier_loads_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.tmap");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut supplier = TmapFileSupplier::new(&path);
        let mut board = Board::new();
        board.load(&mut supplier).unwrap();

        assert_eq!(board.size(), IVec2::new(40, 30));
        assert_eq!(board.cell(IVec2::new(4, 4)), Some(BlockType::Brick));
        assert_eq!(board.cell(IVec2::new(11, 5)), Some(BlockType::Brick));
        assert_eq!(board.cell(IVec2::new(21, 11)), Some(BlockType::Water));
        assert_eq!(board.initial_enemy_tanks().len(), 3);
        assert!(!supplier.has_next());
    }

    #[test]
    fn test_write_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tmap");
        let doc = parse_tmap(SAMPLE).unwrap();
        write_tmap(&doc, &path).unwrap();
        assert_eq!(load_tmap(&path).unwrap(), doc);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut supplier = TmapFileSupplier::new(dir.path().join("nope.tmap"));
        let err = supplier.open().unwrap_err();
        assert!(matches!(err, MapError::Unavailable { .. }));
        assert_eq!(supplier.dimensions(), IVec2::ZERO);
        assert!(supplier.next_placement().is_none());

        let mut board = Board::new();
        assert!(board.load(&mut supplier).is_err());
    }
}
