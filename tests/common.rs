use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub fn fixture_path<P: AsRef<Path>>(path: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}

/// Read a test fixture from a path relative to CARGO_MANIFEST_DIR
#[allow(dead_code)]
pub fn read_fixture<P: AsRef<Path>>(path: P) -> Vec<u8> {
    std::fs::read(&fixture_path(path)).expect("error reading file contents")
}

// Synthetic fonts. Everything below is computed with std alone so that it checks the crate
// rather than agreeing with it.

#[allow(dead_code)]
pub const TRUETYPE_VERSION: [u8; 4] = [0, 1, 0, 0];
#[allow(dead_code)]
pub const CFF_VERSION: [u8; 4] = *b"OTTO";

const CHECKSUM_MAGIC: u32 = 0xB1B0AFBA;

/// Sum of big-endian u32 words, the last one zero padded.
#[allow(dead_code)]
pub fn sum_words(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

#[allow(dead_code)]
pub fn put_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

#[allow(dead_code)]
pub fn put_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

#[allow(dead_code)]
pub fn get_u32(data: &[u8], offset: usize) -> u32 {
    let mut word = [0; 4];
    word.copy_from_slice(&data[offset..offset + 4]);
    u32::from_be_bytes(word)
}

/// `searchRange`, `entrySelector` and `rangeShift` for `num_tables` records.
#[allow(dead_code)]
pub fn search_fields(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let mut entry_selector = 0;
    while 2u32 << entry_selector <= u32::from(num_tables) {
        entry_selector += 1;
    }
    let search_range = 16u32 << entry_selector;
    let range_shift = 16 * u32::from(num_tables) - search_range;
    (search_range as u16, entry_selector as u16, range_shift as u16)
}

/// Offset and length of the first `tag` record in the directory at `directory`.
#[allow(dead_code)]
pub fn find_table(file: &[u8], directory: usize, tag: &[u8; 4]) -> Option<(usize, usize)> {
    let num_tables = usize::from(u16::from_be_bytes([file[directory + 4], file[directory + 5]]));
    (0..num_tables)
        .map(|index| directory + 12 + 16 * index)
        .find(|&record| &file[record..record + 4] == tag)
        .map(|record| {
            (
                get_u32(file, record + 8) as usize,
                get_u32(file, record + 12) as usize,
            )
        })
}

/// Lays out a font with every table record, checksum and `checkSumAdjustment` filled in.
///
/// Tables are written in the order they are added, each padded to a four byte boundary. The
/// same tag may be added twice.
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct SfntBuilder {
    sfnt_version: [u8; 4],
    tables: Vec<([u8; 4], Vec<u8>)>,
    search_fields: Option<(u16, u16, u16)>,
}

#[allow(dead_code)]
impl SfntBuilder {
    pub fn new(sfnt_version: [u8; 4]) -> SfntBuilder {
        SfntBuilder {
            sfnt_version,
            tables: Vec::new(),
            search_fields: None,
        }
    }

    pub fn table(mut self, tag: &[u8; 4], data: Vec<u8>) -> SfntBuilder {
        self.tables.push((*tag, data));
        self
    }

    /// Write these search fields instead of the correct ones.
    pub fn search_fields(mut self, fields: (u16, u16, u16)) -> SfntBuilder {
        self.search_fields = Some(fields);
        self
    }

    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// A standalone font file.
    pub fn build(&self) -> Vec<u8> {
        let mut file = Vec::new();
        if let Some(head) = self.append_to(&mut file) {
            let adjustment = CHECKSUM_MAGIC.wrapping_sub(sum_words(&file));
            put_u32(&mut file, head + 8, adjustment);
        }
        file
    }

    /// Append the directory and then the tables, returning the offset of the first `head`.
    ///
    /// Table offsets are relative to the start of `file`, which must be four byte aligned.
    /// `checkSumAdjustment` is left as zero.
    fn append_to(&self, file: &mut Vec<u8>) -> Option<usize> {
        let num_tables = self.tables.len() as u16;
        let (search_range, entry_selector, range_shift) = self
            .search_fields
            .unwrap_or_else(|| search_fields(num_tables));
        file.extend_from_slice(&self.sfnt_version);
        for value in [num_tables, search_range, entry_selector, range_shift] {
            file.extend_from_slice(&value.to_be_bytes());
        }
        let records = file.len();
        file.resize(records + 16 * self.tables.len(), 0);

        let mut head = None;
        for (index, (tag, data)) in self.tables.iter().enumerate() {
            let offset = file.len();
            let mut data = data.clone();
            if tag == b"head" && data.len() >= 12 {
                put_u32(&mut data, 8, 0);
                head.get_or_insert(offset);
            }
            file.extend_from_slice(&data);
            file.resize((file.len() + 3) & !3, 0);

            let record = records + 16 * index;
            file[record..record + 4].copy_from_slice(tag);
            put_u32(file, record + 4, sum_words(&data));
            put_u32(file, record + 8, offset as u32);
            put_u32(file, record + 12, data.len() as u32);
        }
        head
    }
}

/// A collection of `fonts`, each directory followed by its own tables.
///
/// A version 2 header gets zeroed `DSIG` fields.
#[allow(dead_code)]
pub fn build_collection(fonts: &[SfntBuilder], major_version: u16) -> Vec<u8> {
    let dsig_length = if major_version == 2 { 12 } else { 0 };
    let header_length = 12 + 4 * fonts.len() + dsig_length;
    let mut file = Vec::new();
    file.extend_from_slice(b"ttcf");
    file.extend_from_slice(&major_version.to_be_bytes());
    file.extend_from_slice(&0u16.to_be_bytes());
    file.extend_from_slice(&(fonts.len() as u32).to_be_bytes());
    file.resize(header_length, 0);

    for (index, font) in fonts.iter().enumerate() {
        let offset = file.len() as u32;
        put_u32(&mut file, 12 + 4 * index, offset);
        font.append_to(&mut file);
    }
    file
}

/// A version 1.0 `head` table with a zero `checkSumAdjustment`.
#[allow(dead_code)]
pub fn head_table(flags: u16, index_to_loc_format: i16) -> Vec<u8> {
    let mut data = Vec::with_capacity(54);
    data.extend_from_slice(&1u16.to_be_bytes());
    data.extend_from_slice(&0u16.to_be_bytes());
    data.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&0x5F0F3CF5u32.to_be_bytes());
    data.extend_from_slice(&flags.to_be_bytes());
    data.extend_from_slice(&1024u16.to_be_bytes());
    data.extend_from_slice(&3_600_000_000i64.to_be_bytes());
    data.extend_from_slice(&3_700_000_000i64.to_be_bytes());
    for bound in [0i16, -200, 1000, 800] {
        data.extend_from_slice(&bound.to_be_bytes());
    }
    data.extend_from_slice(&0u16.to_be_bytes());
    data.extend_from_slice(&8u16.to_be_bytes());
    data.extend_from_slice(&2i16.to_be_bytes());
    data.extend_from_slice(&index_to_loc_format.to_be_bytes());
    data.extend_from_slice(&0i16.to_be_bytes());
    data
}

#[allow(dead_code)]
pub fn hhea_table(num_h_metrics: u16) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&1u16.to_be_bytes());
    data.extend_from_slice(&0u16.to_be_bytes());
    for value in [800i16, -200, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&1000u16.to_be_bytes());
    for value in [0i16, 0, 1000, 1, 0, 0, 0, 0, 0, 0, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&num_h_metrics.to_be_bytes());
    data
}

#[allow(dead_code)]
pub fn maxp_table_v1(num_glyphs: u16) -> Vec<u8> {
    let mut data = Vec::with_capacity(32);
    data.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    data.extend_from_slice(&num_glyphs.to_be_bytes());
    for value in [10u16, 2, 0, 0, 2, 0, 0, 0, 0, 64, 0, 0, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data
}

#[allow(dead_code)]
pub fn maxp_table_v0_5(num_glyphs: u16) -> Vec<u8> {
    let mut data = Vec::with_capacity(6);
    data.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    data.extend_from_slice(&num_glyphs.to_be_bytes());
    data
}

#[allow(dead_code)]
pub fn hmtx_table(num_h_metrics: u16, num_glyphs: u16) -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..num_h_metrics {
        data.extend_from_slice(&500u16.to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
    }
    for _ in num_h_metrics..num_glyphs {
        data.extend_from_slice(&0i16.to_be_bytes());
    }
    data
}

/// Short `loca` offsets for glyphs of two bytes each.
#[allow(dead_code)]
pub fn loca_table_short(num_glyphs: u16) -> Vec<u8> {
    (0..=num_glyphs).flat_map(u16::to_be_bytes).collect()
}

#[allow(dead_code)]
pub fn fmtx_table(glyph_index: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    data.extend_from_slice(&0x0002_0000u32.to_be_bytes());
    data.extend_from_slice(&glyph_index.to_be_bytes());
    data.extend_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]);
    data
}

/// A version 0 `COLR` table: base glyph records, then layer records.
#[allow(dead_code)]
pub fn colr_table(base_glyphs: &[(u16, u16, u16)], layers: &[(u16, u16)]) -> Vec<u8> {
    let base_offset = 14u32;
    let layer_offset = base_offset + 6 * base_glyphs.len() as u32;
    let mut data = Vec::new();
    data.extend_from_slice(&0u16.to_be_bytes());
    data.extend_from_slice(&(base_glyphs.len() as u16).to_be_bytes());
    data.extend_from_slice(&base_offset.to_be_bytes());
    data.extend_from_slice(&layer_offset.to_be_bytes());
    data.extend_from_slice(&(layers.len() as u16).to_be_bytes());
    for &(glyph_id, first_layer_index, num_layers) in base_glyphs {
        for value in [glyph_id, first_layer_index, num_layers] {
            data.extend_from_slice(&value.to_be_bytes());
        }
    }
    for &(glyph_id, palette_index) in layers {
        data.extend_from_slice(&glyph_id.to_be_bytes());
        data.extend_from_slice(&palette_index.to_be_bytes());
    }
    data
}

/// A version 0 `CPAL` table with one palette of `num_palette_entries` colours.
#[allow(dead_code)]
pub fn cpal_table(num_palette_entries: u16) -> Vec<u8> {
    let mut data = Vec::new();
    for value in [0u16, num_palette_entries, 1, num_palette_entries] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&14u32.to_be_bytes());
    data.extend_from_slice(&0u16.to_be_bytes());
    for _ in 0..num_palette_entries {
        data.extend_from_slice(&[0x00, 0x00, 0xFF, 0xFF]);
    }
    data
}

/// A two glyph TrueType font that passes every check.
#[allow(dead_code)]
pub fn valid_truetype_font() -> SfntBuilder {
    SfntBuilder::new(TRUETYPE_VERSION)
        .table(b"glyf", vec![0; 4])
        .table(b"head", head_table(0x0003, 0))
        .table(b"hhea", hhea_table(2))
        .table(b"hmtx", hmtx_table(2, 2))
        .table(b"loca", loca_table_short(2))
        .table(b"maxp", maxp_table_v1(2))
}
