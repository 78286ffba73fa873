/// Standard village account codes offered as suggestions. Nothing is
/// validated against this list.
pub const REFERENCE_CODES: &[(&str, &str)] = &[
    ("022.22.1", "Bantuan Keuangan dari APBD Provinsi"),
    ("022.22.2", "Bantuan Keuangan dari APBD Kab/Kota"),
    ("1.1.1.01", "Kas di Bendahara Desa"),
    ("5.1.1.01", "Insentif Kelian Adat"),
    ("5.1.1.02", "Insentif Prajuru Adat"),
    ("5.1.1.03", "Insentif Admin Adat"),
    ("5.1.1.04", "Jaminan Sosial Prajuru Adat"),
    ("5.1.2.01", "Belanja Alat Tulis Kantor (ATK)"),
    ("5.1.2.02", "Belanja Benda Pos & Materai"),
    ("5.1.2.03", "Belanja Alat Listrik & Elektronik"),
    ("5.1.2.04", "Belanja Peralatan Kebersihan"),
    ("5.1.2.05", "Belanja Cetak & Penggandaan"),
    ("5.1.2.06", "Belanja Makan & Minum Rapat"),
    ("5.1.2.07", "Belanja Pakaian Dinas & Atribut"),
    ("5.1.2.08", "Belanja Perjalanan Dinas"),
    ("5.1.2.09", "Belanja Pemeliharaan Gedung & Kantor"),
    ("5.1.3.01", "Belanja Pecalang"),
    ("5.1.3.02", "Belanja Pakis"),
    ("5.1.3.03", "Belanja Modal Gedung & Bangunan"),
    ("5.1.3.04", "Belanja Modal Jalan, Irigasi & Jaringan"),
    ("5.1.4.01", "Belanja Tak Terduga"),
    ("6.1.1.01", "Penerimaan Pembiayaan"),
    ("6.2.1.01", "Pengeluaran Pembiayaan"),
];

pub(crate) const HISTORICAL_CODE_LABEL: &str = "Kode Historis";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSuggestion {
    pub code: String,
    pub name: String,
}

/// Strip the " - name" suffix a picker selection carries.
/// e.g. `"5.1.2.01 - Belanja ATK"` → `"5.1.2.01"`
pub fn clean_code(selection: &str) -> &str {
    selection
        .split(" - ")
        .next()
        .unwrap_or(selection)
        .trim()
}

/// Look up the reference name for a code or picker selection.
pub fn describe_code(selection: &str) -> Option<&'static str> {
    let code = clean_code(selection);
    REFERENCE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
