/// Profile editing steps
///
/// The portal edits the applicant profile one step at a time; each step owns
/// a fixed set of fields and is saved with its own request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStep {
    Personal,
    Address,
    Education,
    Experience,
}

impl ProfileStep {
    pub const ALL: [ProfileStep; 4] = [
        ProfileStep::Personal,
        ProfileStep::Address,
        ProfileStep::Education,
        ProfileStep::Experience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStep::Personal => "personal",
            ProfileStep::Address => "address",
            ProfileStep::Education => "education",
            ProfileStep::Experience => "experience",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(ProfileStep::Personal),
            "address" => Some(ProfileStep::Address),
            "education" => Some(ProfileStep::Education),
            "experience" => Some(ProfileStep::Experience),
            _ => None,
        }
    }

    /// Field names accepted by this step
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ProfileStep::Personal => &[
                "nama_lengkap",
                "nik",
                "tempat_lahir",
                "tanggal_lahir",
                "jenis_kelamin",
                "no_hp",
            ],
            ProfileStep::Address => &["alamat", "kota", "provinsi", "kode_pos"],
            ProfileStep::Education => &["jenjang", "institusi", "jurusan", "ipk", "tahun_lulus"],
            ProfileStep::Experience => &["perusahaan", "jabatan", "mulai", "selesai"],
        }
    }
}
