/// Example import file offered for download.
pub const SAMPLE_TEMPLATE: &str = "Name,Company,Email,Phone,Industry,Status,Tier,Source
\"John Doe\",\"Acme Corp\",\"john@acme.com\",\"(555) 123-4567\",\"Technology\",\"Lead\",\"High\",\"manual\"
\"Jane Smith\",\"Tech Solutions\",\"jane@techsol.com\",\"(555) 234-5678\",\"Software\",\"Contacted\",\"Medium\",\"google\"
";

pub const SAMPLE_TEMPLATE_FILE_NAME: &str = "contacts-import-template.csv";
