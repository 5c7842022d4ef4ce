mod ec;
mod qr;

pub use qr::{Module, QR};

use std::ops::Deref;

use crate::common::{
    bitstream::BitStream,
    codec::{self, to_latin1},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Encodes text as ISO-8859-1 into the smallest symbol that holds it at `ecl`.
pub fn encode(text: &str, ecl: ECLevel) -> QRResult<QR> {
    let data = to_latin1(text)?;
    QRBuilder::new(&data).ec_level(ecl).build()
}

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::default(), mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!("{{ Version: {}, Ec level: {} }}", v, self.ec_level),
            None => format!("{{ Version: None, Ec level: {} }}", self.ec_level),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        log::debug!("Generating QR {}...", self.metadata());

        // Encode data optimally
        let (encoded_data, version) = match self.version {
            Some(v) => (codec::encode_with_version(self.data, v, self.ec_level)?, v),
            None => {
                log::debug!("Finding best version...");
                codec::encode(self.data, self.ec_level)?
            }
        };

        log::debug!("Constructing payload with ecc & interleaving...");
        let (data_blocks, ecc_blocks) = ec::ecc(encoded_data.data(), version, self.ec_level);
        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        log::debug!("Drawing functional patterns & encoding region...");
        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);

        match self.mask {
            Some(m) => {
                log::debug!("Applying mask {}...", *m);
                qr.apply_mask(m);
            }
            None => {
                log::debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr);
            }
        };

        self.report(&qr, &encoded_data);
        Ok(qr)
    }

    fn report(&self, qr: &QR, encoded_data: &BitStream) {
        let version = qr.version();
        let data_capacity = version.data_codewords(self.ec_level);
        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();

        log::debug!("QR generated: {}", qr.metadata());
        log::debug!(
            "Data capacity: {}, Error capacity: {}, Data size: {}, Segment bits: {}",
            data_capacity,
            Self::ec_capacity(version, self.ec_level),
            self.data.len(),
            encoded_data.len()
        );
        log::debug!(
            "Dark cells: {}, Light cells: {}, Balance: {}%",
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );
    }

    pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
        ec::error_correction_capacity(version, ec_level)
    }

    /// Takes the i-th element of every block in turn, skipping blocks already exhausted.
    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
