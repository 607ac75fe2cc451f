//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::{
    fs,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use flate2::{Compression, write::GzEncoder};
use zip::{ZipWriter, write::SimpleFileOptions};

/// A two-sheet document covering the shape, line, group, and text paths.
pub const SAMPLE_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Sheets</key>
    <array>
        <dict>
            <key>SheetTitle</key>
            <string>Overview</string>
            <key>CanvasOrigin</key>
            <string>{0, 0}</string>
            <key>CanvasSize</key>
            <string>{400, 300}</string>
            <key>GraphicsList</key>
            <array>
                <dict>
                    <key>Class</key>
                    <string>ShapedGraphic</string>
                    <key>Bounds</key>
                    <string>{{10, 10}, {100, 50}}</string>
                    <key>Shape</key>
                    <string>Rectangle</string>
                    <key>Style</key>
                    <dict>
                        <key>fill</key>
                        <dict>
                            <key>Color</key>
                            <dict>
                                <key>r</key>
                                <string>255</string>
                                <key>g</key>
                                <string>0</string>
                                <key>b</key>
                                <string>0</string>
                            </dict>
                        </dict>
                    </dict>
                    <key>Text</key>
                    <dict>
                        <key>Text</key>
                        <string>{\rtf1\ansi\ansicpg936 \f0\fs24 \cf0 \'b2\'e2\'ca\'d4}</string>
                    </dict>
                </dict>
                <dict>
                    <key>Class</key>
                    <string>LineGraphic</string>
                    <key>Points</key>
                    <array>
                        <string>{110, 35}</string>
                        <string>{200, 35}</string>
                    </array>
                    <key>Style</key>
                    <dict>
                        <key>stroke</key>
                        <dict>
                            <key>HeadArrow</key>
                            <string>FilledBall</string>
                            <key>Pattern</key>
                            <integer>1</integer>
                        </dict>
                    </dict>
                </dict>
                <dict>
                    <key>Class</key>
                    <string>Group</string>
                    <key>Graphics</key>
                    <array>
                        <dict>
                            <key>Class</key>
                            <string>ShapedGraphic</string>
                            <key>Bounds</key>
                            <string>{{200, 10}, {50, 50}}</string>
                            <key>Shape</key>
                            <string>Circle</string>
                        </dict>
                    </array>
                </dict>
            </array>
        </dict>
        <dict>
            <key>GraphicsList</key>
            <array/>
        </dict>
    </array>
</dict>
</plist>
"#;

/// Bytes standing in for a preview image.
pub const PREVIEW_BYTES: &[u8] = b"\xff\xd8\xff\xe0 preview";

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builds a zip archive holding the given entries.
pub fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}
