use crate::models::BookRecord;

// (title, author, year, summary, themes); language is "ro" throughout.
const BOOKS: &[(&str, &str, i64, &str, &str)] = &[
    (
        "1984",
        "George Orwell",
        1949,
        "Într-un stat totalitar, Partidul controlează fiecare aspect al vieții.\n\
         Winston Smith începe să se îndoiască de propaganda oficială și caută adevărul.\n\
         O relație interzisă îi dă curajul să sfideze sistemul.\n\
         Lupta pentru libertate îl pune față în față cu supravegherea și manipularea.",
        "totalitarism, supraveghere, libertate, manipulare",
    ),
    (
        "Hobbitul",
        "J.R.R. Tolkien",
        1937,
        "Bilbo Baggins pornește într-o călătorie neașteptată alături de treisprezece pitici.\n\
         Drumul îi dezvăluie curajul ascuns și lumea vastă dincolo de Comitat.\n\
         Întâlnește creaturi periculoase și descoperă un inel misterios.\n\
         Aventura îl transformă dintr-un hobbit comod într-un erou ingenios.",
        "aventură, curaj, auto-descoperire, prietenie",
    ),
    (
        "Să ucizi o pasăre cântătoare",
        "Harper Lee",
        1960,
        "În sudul Segregat al SUA, Scout Finch observă nedreptatea prin ochii copilăriei.\n\
         Tatăl ei, Atticus, apără un bărbat de culoare acuzat pe nedrept.\n\
         Procesul expune prejudecăți adânc înrădăcinate în comunitate.\n\
         Familia învață ce înseamnă empatia și curajul moral.",
        "justiție, rasism, empatie, familie",
    ),
    (
        "Mândrie și prejudecată",
        "Jane Austen",
        1813,
        "Elizabeth Bennet și domnul Darcy se confruntă cu prime impresii înșelătoare.\n\
         Normele sociale și așteptările de clasă complică relațiile.\n\
         În timp, sinceritatea și autocunoașterea schimbă perspectivele.\n\
         Dragostea se conturează prin depășirea mândriei și prejudecăților.",
        "dragoste, clasă socială, maturizare, familie",
    ),
    (
        "De veghe în lanul de secară",
        "J.D. Salinger",
        1951,
        "Holden Caulfield rătăcește prin New York după ce părăsește internatul.\n\
         Își caută sensul într-o lume pe care o percepe ca falsă.\n\
         Întâlnirile îl dezvăluie vulnerabil și cinic deopotrivă.\n\
         Legătura cu sora lui îi oferă o ancoră de sinceritate.",
        "alienare, identitate, maturizare, familie",
    ),
    (
        "Marele Gatsby",
        "F. Scott Fitzgerald",
        1925,
        "În epoca jazzului, Jay Gatsby își urmărește visul și o iubire imposibilă.\n\
         Petrecerile somptuoase ascund dorințe și iluzii fragile.\n\
         Narațiunea lui Nick Carraway dezvăluie ipocrizia clasei înstărite.\n\
         Visul american capătă nuanțe de nostalgie și deziluzie.",
        "visul american, iubire, clasă socială, iluzie",
    ),
    (
        "Moby-Dick",
        "Herman Melville",
        1851,
        "Căpitanul Ahab pornește într-o urmărire obsesivă a balenei albe.\n\
         Echipajul corăbiei Pequod trăiește frica și fascinația oceanului.\n\
         Povestea îmbină aventură nautică, filozofie și mit.\n\
         Obsesia conduce către un deznodământ inevitabil.",
        "obsesie, destin, natură, aventură",
    ),
    (
        "Crimă și pedeapsă",
        "Fiodor Dostoievski",
        1866,
        "Raskolnikov comite o crimă, convins că scopul îi justifică fapta.\n\
         Conștiința îl macină între vinovăție și justificare intelectuală.\n\
         Întâlnirile cu Sonia deschid calea spre compasiune.\n\
         Mântuirea devine posibilă prin recunoaștere și suferință.",
        "vinovăție, morală, mântuire, psihologie",
    ),
    (
        "Război și pace",
        "Lev Tolstoi",
        1869,
        "Roman panoramic al Rusiei în timpul invaziilor napoleoniene.\n\
         Destinele familiilor Rostov, Bolkonski și Bezuhov se împletesc.\n\
         Bătăliile alternează cu reflecții despre istorie și liber arbitru.\n\
         Iubirea și datoria capătă sens în mijlocul haosului.",
        "istorie, familie, iubire, soartă",
    ),
    (
        "Stăpânul Inelelor: Frăția Inelului",
        "J.R.R. Tolkien",
        1954,
        "Frodo moștenește Inelul Puterii și misiunea de a-l distruge.\n\
         O frăție diversă îl însoțește prin Ținutul de Mijloc.\n\
         Răul crește în umbră, iar prietenia este pusă la încercare.\n\
         Călătoria începe cu speranță, teamă și hotărâre.",
        "aventură, prietenie, sacrificiu, bine vs. rău",
    ),
    (
        "Harry Potter și Piatra Filozofală",
        "J.K. Rowling",
        1997,
        "Un băiat descoperă că este vrăjitor și ajunge la Hogwarts.\n\
         Noi prieteni și secrete ale lumii magice îi schimbă viața.\n\
         Misterul Pietrei Filozofale îi pune curajul la încercare.\n\
         Descoperă puterea prieteniei și a alegerilor.",
        "prietenie, curaj, descoperire de sine, magie",
    ),
    (
        "Alchimistul",
        "Paulo Coelho",
        1988,
        "Păstorul Santiago pornește spre Egipt în căutarea comorii sale.\n\
         Întâlnirile devin lecții despre semne și destin personal.\n\
         Călătoria exterioară reflectă transformarea interioară.\n\
         Visurile capătă sens când îți asculți inima.",
        "destin, sensul vieții, spiritualitate, călătorie",
    ),
    (
        "Micul Prinț",
        "Antoine de Saint-Exupéry",
        1943,
        "Un pilot rătăcit în deșert întâlnește un băiat venit de pe o planetă mică.\n\
         Poveștile sale dezvăluie esența prieteniei și a responsabilității.\n\
         Simplicitatea aparentă ascunde reflecții profunde despre iubire.\n\
         „Esentialul este invizibil pentru ochi” devine lecția centrală.",
        "prietenie, inocență, responsabilitate, iubire",
    ),
    (
        "Minunata lume nouă",
        "Aldous Huxley",
        1932,
        "O societate futuristă reglează fericirea prin control și condiționare.\n\
         Bernard și John „Sălbaticul” pun sub semnul întrebării stabilitatea.\n\
         Plăcerea standardizată intră în conflict cu libertatea autentică.\n\
         Progresul devine ambiguu când exclude umanitatea.",
        "distopie, libertate, tehnologie, conformism",
    ),
    (
        "Fahrenheit 451",
        "Ray Bradbury",
        1953,
        "Cărturarul Montag trăiește într-o lume unde cărțile sunt arse.\n\
         O întâlnire îi trezește curiozitatea și sete de cunoaștere.\n\
         Începe să pună întrebări periculoase despre libertatea de gândire.\n\
         Rebeliunea sa aprinde scânteia schimbării.",
        "cenzură, cunoaștere, libertate, conformism",
    ),
    (
        "Numele trandafirului",
        "Umberto Eco",
        1980,
        "Într-o mănăstire medievală, o serie de morți misterioase tulbură ordinea.\n\
         Călugărul William de Baskerville investighează cu logică și erudiție.\n\
         Biblioteca ascunde secrete periculoase despre puterea cunoașterii.\n\
         Adevărul se împletește cu simboluri, interdicții și frică.",
        "mister, cunoaștere, religie, putere",
    ),
    (
        "Un veac de singurătate",
        "Gabriel García Márquez",
        1967,
        "Saga familiei Buendía urmărește destinul orașului Macondo.\n\
         Magicul și cotidianul conviețuiesc într-o istorie ciclică.\n\
         Iubirile, dorințele și singurătățile se repetă între generații.\n\
         Timpul pare un cerc, nu o linie.",
        "realism magic, familie, destin, timp",
    ),
    (
        "Vânătorii de zmeie",
        "Khaled Hosseini",
        2003,
        "Amir și Hassan cresc în Kabul, legați de o prietenie complexă.\n\
         O trădare din copilărie lasă răni adânci și nevoia de iertare.\n\
         Războiul schimbă țara și destinele lor pentru totdeauna.\n\
         Curajul de a repara trecutul devine miza vieții adulte.",
        "prietenie, vinovăție, iertare, război",
    ),
    (
        "Fata cu un dragon tatuat",
        "Stieg Larsson",
        2005,
        "Jurnalistul Blomkvist investighează dispariția unei tinere dintr-o familie influentă.\n\
         Hackerul Lisbeth Salander aduce geniu și neconvențional în anchetă.\n\
         Secrete vechi ies la iveală, amenințând vieți și reputații.\n\
         Adevărul dezvăluie o rețea de corupție și violență.",
        "mister, corupție, justiție, abuz",
    ),
    (
        "Dune",
        "Frank Herbert",
        1965,
        "Pe planeta-deșert Arrakis, miza este controlul mirodeniei.\n\
         Paul Atreides supraviețuiește trădării și se aliază cu fremenii.\n\
         Ecologia planetei și profețiile modelează viitorul politic.\n\
         Puterea se câștigă prin viziune, sacrificiu și adaptare.",
        "politică, ecologie, destin, putere",
    ),
    (
        "Mândria oricărei biblioteci: Micul Prinț (ediție pentru copii)",
        "Antoine de Saint-Exupéry",
        1943,
        "O versiune pentru copii care păstrează mesajele-cheie.\n\
         Accent pe prietenie, imaginație și responsabilitate.\n\
         Ilustrațiile și limbajul accesibil oferă o nouă intrare în univers.\n\
         Invită la dialog între copii și părinți.",
        "prietenie, familie, educație, imaginație",
    ),
];

/// The seed library of Romanian-language book summaries.
pub fn seed_books() -> Vec<BookRecord> {
    BOOKS
        .iter()
        .map(|(title, author, year, summary, themes)| BookRecord {
            title: (*title).to_string(),
            author: Some((*author).to_string()),
            year: Some(*year),
            language: "ro".to_string(),
            summary: (*summary).to_string(),
            themes: Some((*themes).to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn titles_are_unique_and_summaries_present() {
        let books = seed_books();
        assert_eq!(books.len(), 21);

        let titles: HashSet<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles.len(), books.len());

        for book in &books {
            assert!(!book.summary.trim().is_empty(), "{} has no summary", book.title);
            assert!(book.themes.as_deref().is_some_and(|t| t.contains(',')));
        }
    }
}
