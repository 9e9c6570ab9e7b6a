use xfilios::{Config, DownloadLink, FileType, create_download_link};

#[cfg(test)]
mod download_link_tests {
    use super::*;

    #[test]
    fn test_docx_and_xlsx_links() {
        for filetype in ["docx", "xlsx"] {
            let link = create_download_link("UEsDBA==", "out", filetype).unwrap();
            assert_eq!(
                link,
                r#"<a href="data:application/octet-stream;base64,UEsDBA==" download="out">Click To Download</a>"#
            );
        }
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = create_download_link("UEsDBA==", "out.csv", "csv").unwrap_err();
        assert_eq!(
            err.to_string(),
            "csv is not an accepted file type. Only accepted file types are docx, xlsx"
        );
    }

    #[test]
    fn test_file_type_parsing() {
        assert_eq!("docx".parse::<FileType>().unwrap(), FileType::Docx);
        assert_eq!("xlsx".parse::<FileType>().unwrap(), FileType::Xlsx);
        assert!("xls".parse::<FileType>().is_err());
        assert_eq!(FileType::Xlsx.extension(), "xlsx");
    }

    #[test]
    fn test_configured_link_text_and_mime() {
        let config = Config {
            link: DownloadLink {
                text: "Download report".to_string(),
                mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            },
            ..Config::default()
        };

        let link = config.link.render("AA==", "report.docx", FileType::Docx);
        assert_eq!(
            link,
            r#"<a href="data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,AA==" download="report.docx">Download report</a>"#
        );
    }
}
