//! Figurine table compiled into the binary.
//!
//! Covers the starter pack and the first figurine waves. Later waves can be
//! supplied through a JSON catalog (see [`Catalog::load`](crate::Catalog::load)).

/// `(id, name, world)` for vehicle and gadget builds. Ids start at 1000.
pub const VEHICLES: &[(u32, &str, &str)] = &[
    (1000, "Police Car", "The LEGO Movie"),
    (1001, "Aerial Squad Car", "The LEGO Movie"),
    (1002, "Missile Striker", "The LEGO Movie"),
    (1006, "Batmobile", "DC Comics"),
    (1007, "Batblaster", "DC Comics"),
    (1008, "Sonic Batray", "DC Comics"),
    (1009, "Benny's Spaceship", "The LEGO Movie"),
    (1010, "Lasercraft", "The LEGO Movie"),
    (1011, "The Annihilator", "The LEGO Movie"),
    (1012, "DeLorean Time Machine", "Back to the Future"),
    (1013, "Electric Time Machine", "Back to the Future"),
    (1014, "Ultra Time Machine", "Back to the Future"),
    (1015, "Hoverboard", "Back to the Future"),
    (1016, "Cyclone Board", "Back to the Future"),
    (1017, "Ultimate Hoverjet", "Back to the Future"),
    (1018, "Eagle Interceptor", "Legends of Chima"),
    (1019, "Eagle Sky Blazer", "Legends of Chima"),
    (1020, "Eagle Swoop Diver", "Legends of Chima"),
    (1021, "Swamp Skimmer", "Legends of Chima"),
    (1022, "Cragger's Fireship", "Legends of Chima"),
    (1023, "Croc Command Sub", "Legends of Chima"),
    (1024, "Cyber-Guard", "Doctor Who"),
    (1025, "Cyber-Wrecker", "Doctor Who"),
    (1026, "Laser Robot Walker", "Doctor Who"),
    (1027, "K-9", "Doctor Who"),
    (1028, "K-9 Ruins Racer", "Doctor Who"),
    (1029, "K-9 Laser Cutter", "Doctor Who"),
    (1030, "TARDIS", "Doctor Who"),
    (1031, "Laser-Pulse TARDIS", "Doctor Who"),
    (1032, "Energy-Burst TARDIS", "Doctor Who"),
];

/// `(id, name, world)` for minifigure characters.
pub const CHARACTERS: &[(u32, &str, &str)] = &[
    (1, "Batman", "DC Comics"),
    (2, "Gandalf", "The Lord of the Rings"),
    (3, "Wyldstyle", "The LEGO Movie"),
    (4, "Aquaman", "DC Comics"),
    (5, "Bad Cop", "The LEGO Movie"),
    (6, "Bane", "DC Comics"),
    (7, "Bart Simpson", "The Simpsons"),
    (8, "Benny", "The LEGO Movie"),
    (9, "Chell", "Portal 2"),
    (10, "Cole", "Ninjago"),
    (11, "Cragger", "Legends of Chima"),
    (12, "Cyborg", "DC Comics"),
    (13, "Cyberman", "Doctor Who"),
    (14, "Doc Brown", "Back to the Future"),
    (15, "The Doctor", "Doctor Who"),
    (16, "Emmet", "The LEGO Movie"),
    (17, "Eris", "Legends of Chima"),
    (18, "Gimli", "The Lord of the Rings"),
    (19, "Gollum", "The Lord of the Rings"),
    (20, "Harley Quinn", "DC Comics"),
    (21, "Homer Simpson", "The Simpsons"),
    (22, "Jay", "Ninjago"),
    (23, "Joker", "DC Comics"),
    (24, "Kai", "Ninjago"),
    (25, "ACU Trooper", "Jurassic World"),
    (26, "Gamer Kid", "Midway Arcade"),
    (27, "Krusty the Clown", "The Simpsons"),
    (28, "Laval", "Legends of Chima"),
    (29, "Legolas", "The Lord of the Rings"),
    (30, "Lloyd", "Ninjago"),
    (31, "Marty McFly", "Back to the Future"),
    (32, "Nya", "Ninjago"),
    (33, "Owen Grady", "Jurassic World"),
    (34, "Peter Venkman", "Ghostbusters"),
    (35, "Slimer", "Ghostbusters"),
    (36, "Scooby-Doo", "Scooby-Doo"),
    (37, "Sensei Wu", "Ninjago"),
    (38, "Shaggy", "Scooby-Doo"),
    (39, "Stay Puft", "Ghostbusters"),
    (40, "Superman", "DC Comics"),
    (41, "Unikitty", "The LEGO Movie"),
    (42, "Wicked Witch of the West", "The Wizard of Oz"),
    (43, "Wonder Woman", "DC Comics"),
    (44, "Zane", "Ninjago"),
    (45, "Green Arrow", "DC Comics"),
    (46, "Supergirl", "DC Comics"),
];
