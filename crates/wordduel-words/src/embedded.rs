//! The built-in French word list.
//!
//! Every entry is uppercase ASCII, 5 to 7 letters long. The same list
//! serves as answer candidates and as the accepted-guess list.

/// Number of entries in [`BUILTIN_WORDS`].
pub const BUILTIN_WORD_COUNT: usize = 258;

/// Words shipped with the server.
pub const BUILTIN_WORDS: &[&str] = &[
    "ABRIER", "ABUSER", "ACCORD", "ADORER", "AFFUTS", "AGITER", "AIDER", "AIMER",
    "AJOUTS", "ALARME", "BALADE", "BALISE", "BANANE", "BANCAL", "BANDIT", "BANQUE",
    "BARQUE", "BASSIN", "BATONS", "BEAUTE", "CABANE", "CABINE", "CACHER", "CADEAU",
    "CAISSE", "CALMER", "CAMPER", "CANARD", "CANOTS", "CAPOTE", "DANGER", "DANSER",
    "DATER", "DEBORD", "DECORS", "DEFAIT", "DEGATS", "DELICE", "DEMAIN", "DENIER",
    "ECARTS", "ECHECS", "ECLATS", "ECOLES", "ECRANS", "ECRITS", "EDITER", "EFFETS",
    "EGARER", "ELEVER", "FACILE", "FACTOR", "FADING", "FAIBLE", "FAIRES", "FALOTS",
    "FAMINE", "FANION", "FARDER", "FARINE", "GACHER", "GADGET", "GAGNER", "GALETS",
    "GALONS", "GAMINS", "GARAGE", "GARDER", "GARCON", "GARER", "HABILE", "HABITS",
    "HACHER", "HALETS", "HALLES", "HALTER", "HANCHE", "HANGAR", "HANTER", "HARDIS",
    "IDEALS", "IDIOTS", "IGNARE", "IGNORE", "ILOTER", "IMAGE", "IMITER", "IMPACT",
    "IMPORT", "IMPOST", "JABOTS", "JACHER", "JACOTS", "JADIS", "JALONS", "JAMBES",
    "JARDIN", "JARGON", "JASPER", "JETONS", "KILOS", "KINNES", "KITCH", "KOTER",
    "KRAAL", "KRAFT", "KURDE", "KYRIE", "KYSTE", "LABELS", "LABOUR", "LACETS",
    "LACHER", "LACTES", "LADITE", "LAGONS", "LAIDER", "LAITER", "LAMINE", "MACHIN",
    "MACLER", "MADAME", "MAGOTS", "MAIGRE", "MAILLE", "MAINER", "MAISON", "MALADE",
    "MALICE", "NAGER", "NAIFS", "NAINS", "NAITRE", "NANAS", "NANTES", "NARINE",
    "NATIFS", "NATURE", "NAVETS", "OBLATS", "OBLIGE", "OBSCUR", "OBSEDE", "OBTENU",
    "OBTURE", "OBUSES", "OCELOT", "OCTETS", "OCULER", "PACTES", "PADRES", "PAGODE",
    "PAIENS", "PAILLE", "PAIRES", "PALACE", "PALIER", "PALMER", "PALPER", "QUAIRE",
    "QUAKER", "QUARTZ", "QUASAR", "QUATRE", "QUEBEC", "QUELER", "QUENNE", "QUERIR",
    "QUETES", "RABATS", "RABIOT", "RACINE", "RADARS", "RADIER", "RADINS", "RADIOS",
    "RADIUM", "RADONS", "RAFALE", "SABLER", "SABOTS", "SABRES", "SACHER", "SACRES",
    "SADITE", "SAFARI", "SAGACE", "SAGOUIN", "SAHARA", "TABACS", "TABLES", "TABORS",
    "TABOUS", "TACHER", "TACLER", "TACTES", "TADJIK", "TAGUER", "TAILLE", "UNIFIE",
    "UNIQUE", "UNIRAS", "UNISEX", "UNISSE", "UNITES", "UNIVER", "URBAIN", "URGENT",
    "URINER", "VACANT", "VACHER", "VAGINS", "VAGUER", "VAINCS", "VAINES", "VAIRON",
    "VALETS", "VALIDE", "VALISE", "WAGONS", "WALIS", "WALLON", "WATTS", "WEBER",
    "WELTER", "WHARF", "WHISKY", "WIDGET", "WILAYA", "XENONS", "XERXES", "XHOSA",
    "XIPHO", "XYLENE", "XYLOSE", "XYSTES", "XYSTRE", "XYSTUS", "YACHTS", "YACKS",
    "YAKAS", "YAMBA", "YANKS", "YARDS", "YAWLS", "YEBLES", "YEMEN", "YETIS",
    "ZABRES", "ZAINES", "ZAMBIE", "ZANZIS", "ZAPPES", "ZEBRES", "ZELOTE", "ZENITH",
    "ZESTES", "ZIBELI",
];
