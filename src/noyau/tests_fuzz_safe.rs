//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler lecture / réduction / rendu sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - on accepte les erreurs de lecture (texte volontairement cassé)
//! - invariants clés : aller-retour texte, forme canonique, pas de panique

use std::time::{Duration, Instant};

use super::canon::est_canonique;
use super::{asterms, expression_factory, reduce, standard, SymbolicError};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de textes (bornée) ------------------------ */

const BASES: [&str; 9] = ["m", "s", "kg", "J", "erg", "km", "K", "1", "µm"];

fn gen_exposant(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => "2".to_string(),
        1 => "-1".to_string(),
        2 => "1/2".to_string(),
        3 => "-3/2".to_string(),
        4 => "0.5".to_string(),
        5 => "(2/3)".to_string(),
        _ => "0".to_string(),
    }
}

fn gen_facteur(rng: &mut Rng) -> String {
    let base = BASES[rng.pick(BASES.len() as u32) as usize];
    if rng.coin() {
        format!("{base}^{}", gen_exposant(rng))
    } else {
        base.to_string()
    }
}

/// Texte valide : facteurs séparés par * ou /, espacement aléatoire.
fn gen_valide(rng: &mut Rng, n: usize) -> String {
    let mut s = String::new();
    if rng.pick(5) == 0 {
        s.push('/');
    }
    for k in 0..n {
        if k > 0 {
            let op = if rng.coin() { '*' } else { '/' };
            // "m^2/1^2" serait lu comme l’exposant 2/1 : '/' collé seulement avec un blanc après
            match rng.pick(3) {
                0 if op == '*' => s.push(op),
                1 => {
                    s.push(' ');
                    s.push(op);
                    s.push(' ');
                }
                _ => {
                    s.push(op);
                    s.push(' ');
                }
            }
        }
        s.push_str(&gen_facteur(rng));
    }
    s
}

/// Texte potentiellement cassé : on injecte des caractères au hasard.
fn gen_bruite(rng: &mut Rng, n: usize) -> String {
    const BRUIT: [char; 8] = ['*', '/', '^', ' ', '(', ')', '-', '.'];
    let mut s: Vec<char> = gen_valide(rng, n).chars().collect();
    for _ in 0..(1 + rng.pick(3)) {
        let c = BRUIT[rng.pick(BRUIT.len() as u32) as usize];
        let pos = rng.pick(s.len() as u32 + 1) as usize;
        s.insert(pos, c);
    }
    s.into_iter().collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_aller_retour_et_canonique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = 1 + rng.pick(6) as usize;
        let texte = gen_valide(&mut rng, n);

        let e = expression_factory(texte.as_str())
            .unwrap_or_else(|err| panic!("texte valide refusé: {texte:?} err={err}"));
        assert!(est_canonique(e.terms()), "non canonique: {texte:?} -> {e}");

        let rendu = e.to_string();
        let relu = expression_factory(rendu.as_str())
            .unwrap_or_else(|err| panic!("rendu illisible: {rendu:?} err={err}"));
        assert_eq!(relu, e, "aller-retour: {texte:?} -> {rendu:?}");

        // standard ne change pas le contenu algébrique
        let std_txt = standard(texte.as_str()).unwrap();
        assert_eq!(expression_factory(std_txt.as_str()).unwrap(), e, "{texte:?}");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        let ta = gen_valide(&mut a, 5);
        let tb = gen_valide(&mut b, 5);
        assert_eq!(ta, tb);

        // même texte => même forme canonique, même ordre
        let ra = reduce(asterms(&ta).unwrap());
        let rb = reduce(asterms(&tb).unwrap());
        assert_eq!(ra, rb);
    }
}

#[test]
fn fuzz_safe_texte_bruite_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let texte = gen_bruite(&mut rng, 4);
        match expression_factory(texte.as_str()) {
            Ok(e) => {
                assert!(est_canonique(e.terms()));
                seen_ok += 1;
            }
            Err(err) => {
                // seule une erreur de lecture est acceptable pour du texte
                assert!(
                    matches!(err, SymbolicError::ParsingValue { .. }),
                    "erreur non attendue: texte={texte:?} err={err:?}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}
