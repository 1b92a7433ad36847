//! Render one certificate to `certificate.pdf`.
//!
//! ```text
//! cargo run --example certificate -- NAME.ttf REGULAR.ttf BOLD.ttf [BACKGROUND.png]
//! ```
use cert_typeset::{
    layout_certificate, CertificateFontIds, CertificateFonts, CertificateSettings, Document,
    Font, Image, Info, PageGeometry, StyledToken,
};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("usage: certificate NAME.ttf REGULAR.ttf BOLD.ttf [BACKGROUND.png]");
        std::process::exit(2);
    }

    let load = |path: &str| {
        let bytes = std::fs::read(path).expect("can read font");
        Font::load(bytes).expect("can load font")
    };
    let name_font = load(&args[0]);
    let regular = load(&args[1]);
    let bold = load(&args[2]);

    let body = vec![
        StyledToken::regular(
            "No dia 10/10/2024, das 14:00 às 16:00, participou de Palestra realizada para \
             os membros do Conselho Especial de Justiça, que teve como tema",
        ),
        StyledToken::bold("“Aspectos Procedimentais e de Funcionalidade da Justiça”."),
    ];

    let layout = layout_certificate(
        CertificateFonts {
            name: &name_font,
            regular: &regular,
            bold: &bold,
        },
        "Ana Maria da Silva",
        &body,
        &CertificateSettings::default(),
        PageGeometry::default(),
    )
    .expect("can lay out the certificate");

    let mut doc = Document::default();
    doc.set_info(Info::new().title("Certificado"));
    let background = args
        .get(3)
        .map(|path| doc.add_image(Image::from_disk(path).expect("can load background")));
    let fonts = CertificateFontIds {
        name: doc.add_font(name_font),
        regular: doc.add_font(regular),
        bold: doc.add_font(bold),
    };
    doc.add_certificate(&layout, fonts, background);

    let out = std::fs::File::create("certificate.pdf").expect("can create file");
    doc.write(out).expect("can write pdf");
}
