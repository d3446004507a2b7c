//! Test fixtures and helpers shared across the row extractor test modules

mod delimited_tests;

use crate::config::IngestConfig;

/// Default extraction config used by the tests
pub fn test_config() -> IngestConfig {
    IngestConfig::default()
}

/// A small SpreadsheetML export in the vendor layout: two header rows
/// (instrument label, measurement-unit label) and two data rows, with the
/// trailing empty cell of the last row dropped by the writer.
pub fn sample_markup_export() -> String {
    r#"<?xml version="1.0"?>
<Workbook xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <ss:Worksheet ss:Name="Export">
  <ss:Table>
   <ss:Row>
    <ss:Cell><ss:Data ss:Type="String">Date/Time</ss:Data></ss:Cell>
    <ss:Cell><ss:Data ss:Type="String">HC Air temperature [&#176;C]</ss:Data></ss:Cell>
    <ss:Cell><ss:Data ss:Type="String">Precipitation [mm]</ss:Data></ss:Cell>
   </ss:Row>
   <ss:Row>
    <ss:Cell/>
    <ss:Cell><ss:Data ss:Type="String">avg</ss:Data></ss:Cell>
    <ss:Cell><ss:Data ss:Type="String">avg</ss:Data></ss:Cell>
   </ss:Row>
   <ss:Row>
    <ss:Cell><ss:Data ss:Type="String">2024-01-01 09:00:00</ss:Data></ss:Cell>
    <ss:Cell><ss:Data ss:Type="Number">27.5</ss:Data></ss:Cell>
    <ss:Cell><ss:Data ss:Type="Number">5</ss:Data></ss:Cell>
   </ss:Row>
   <ss:Row>
    <ss:Cell><ss:Data ss:Type="String">2024-01-02 09:00:00</ss:Data></ss:Cell>
    <ss:Cell><ss:Data ss:Type="Number">28.1</ss:Data></ss:Cell>
   </ss:Row>
  </ss:Table>
 </ss:Worksheet>
</Workbook>"#
        .to_string()
}

/// Delimited export with a ragged final row, as written by firmwares that
/// drop trailing empty cells
pub fn sample_delimited_export() -> String {
    "Date/Time,Precip,TempMax,TempMin\n\
     2024-01-01 09:00:00,5,30,20\n\
     2024-01-02 09:00:00,0,32\n"
        .to_string()
}
