//! The service's single HTML page: the upload form, with a flash-style
//! error box when a request fails.

const UPLOAD_FORM_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Resume Formatter</title>
    <style>
        body { font-family: Arial, sans-serif; background-color: #f5f5f5; margin: 0; padding: 20px; }
        .container { background: white; max-width: 600px; margin: 0 auto; padding: 40px; border-radius: 12px; box-shadow: 0 4px 12px rgba(0,0,0,0.1); }
        h1 { text-align: center; color: #2c3e50; margin-bottom: 10px; font-size: 28px; }
        .subtitle { text-align: center; color: #7f8c8d; margin-bottom: 30px; font-size: 14px; }
        .upload-section { border: 2px dashed #3498db; padding: 30px; margin: 25px 0; background-color: #f8f9fa; border-radius: 8px; }
        .file-input { margin: 15px 0; }
        .file-input label { display: block; margin-bottom: 5px; color: #2c3e50; font-weight: bold; }
        input[type="file"] { padding: 8px; border: 1px solid #ddd; border-radius: 4px; width: 100%; box-sizing: border-box; }
        .submit-btn { background: #3498db; color: white; padding: 15px 40px; border: none; border-radius: 6px; cursor: pointer; font-size: 16px; font-weight: bold; display: block; margin: 0 auto; }
        .submit-btn:hover { background: #2980b9; }
        .file-info { font-size: 12px; color: #7f8c8d; margin-top: 5px; }
        .error { color: #e74c3c; margin: 15px 0; padding: 15px; background: #fdf2f2; border-radius: 6px; border: 1px solid #fecaca; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Resume Formatter</h1>
        <p class="subtitle">Upload a resume, download a professionally formatted document</p>
        {error_block}
        <form method="POST" enctype="multipart/form-data">
            <div class="upload-section">
                <h3>Upload Files</h3>
                <div class="file-input">
                    <label for="resume_file">Resume:</label>
                    <input type="file" id="resume_file" name="resume_file" accept=".pdf,.doc,.docx,.txt" required>
                </div>
                <div class="file-input">
                    <label for="logo_file">Logo (Optional):</label>
                    <input type="file" id="logo_file" name="logo_file" accept=".png,.jpg,.jpeg">
                    <div class="file-info">Embedded in the document header</div>
                </div>
            </div>
            <button type="submit" class="submit-btn">Create Professional Resume</button>
        </form>
    </div>
</body>
</html>
"#;

/// Renders the upload page, flashing `error` above the form when present.
pub fn render_upload_form(error: Option<&str>) -> String {
    let error_block = match error {
        Some(message) => format!(
            r#"<div class="error"><p><strong>Error:</strong> {}</p></div>"#,
            html_escape(message)
        ),
        None => String::new(),
    };
    UPLOAD_FORM_TEMPLATE.replace("{error_block}", &error_block)
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_has_no_error_block_by_default() {
        let page = render_upload_form(None);
        assert!(!page.contains("class=\"error\""));
        assert!(page.contains("name=\"resume_file\""));
        assert!(page.contains("name=\"logo_file\""));
    }

    #[test]
    fn test_error_message_is_flashed_and_escaped() {
        let page = render_upload_form(Some("bad <input>"));
        assert!(page.contains("class=\"error\""));
        assert!(page.contains("bad &lt;input&gt;"));
        assert!(!page.contains("bad <input>"));
    }
}
