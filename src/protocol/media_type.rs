//! File media kinds detected by the service on upload.

crate::wire_enum! {
    /// The media kind of a file, used to filter flat file listings.
    pub enum MediaType {
        /// Audio files.
        Audio => "audio",
        /// Backup and temporary copies.
        Backup => "backup",
        /// E-books.
        Book => "book",
        /// Compressed and archived files.
        Compressed => "compressed",
        /// Database files.
        Data => "data",
        /// Source code and IDE files.
        Development => "development",
        /// Disk images and related files.
        Diskimage => "diskimage",
        /// Office documents.
        Document => "document",
        /// Encrypted files.
        Encoded => "encoded",
        /// Executables.
        Executable => "executable",
        /// Flash video and animation.
        Flash => "flash",
        /// Fonts.
        Font => "font",
        /// Images.
        Image => "image",
        /// Application settings.
        Settings => "settings",
        /// Spreadsheets.
        Spreadsheet => "spreadsheet",
        /// Text files.
        Text => "text",
        /// Unknown kind.
        Unknown => "unknown",
        /// Video files.
        Video => "video",
        /// Web files such as CSS and certificates.
        Web => "web",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_are_listed() {
        assert_eq!(MediaType::ALL.len(), 19);
        assert_eq!(MediaType::WIRE_NAMES.len(), 19);
    }

    #[test]
    fn test_wire_names_match_variant_names() {
        for kind in MediaType::ALL {
            assert_eq!(MediaType::from_wire(kind.wire_name()), Some(*kind));
        }
    }
}
