//! Character-set catalog.
//!
//! Static definitions of every character class a password may draw from,
//! and the slot tags the password algorithm assigns to positions before
//! sampling. All sets are handled as sequences of Unicode code points:
//! several classes are multi-byte in UTF-8, so nothing here indexes bytes.

use crate::options::GenerationOptions;

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

const LOWERCASE: &str = "abcdefghijkmnopqrstuvwxyz";
const LOWERCASE_AMBIGUOUS: &str = "l";

const UPPERCASE: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";
const UPPERCASE_AMBIGUOUS: &str = "IO";

const NUMBERS: &str = "23456789";
const NUMBERS_AMBIGUOUS: &str = "01";

const SPECIAL: &str = "!@#$%^&*";

/// Frequently used kanji (999 code points).
const IDEOGRAPHS: &str = concat!(
    "日一国会人年大十二本中長出三同時政事自行社見月分議後前民生連五発間対上部東者党地",
    "合市業内相方四定今回新場金員九入選立開手米力学問高代明実円関決子動京全目表戦経通",
    "外最言氏現理調体化田当八六約主題下首意法不来作性的要用制治度務強気小七成期公持野",
    "協取都和統以機平総加山思家話世受区領多県続進正安設保改数記院女初北午指権心界支第",
    "産結百派点教報済書府活原先共得解名交資予川向際査勝面委告軍文反元重近千考判認画海",
    "参売利組知案道信策集在件団別物側任引使求所次水半品昨論計死官増係感特情投示変打男",
    "基私各始島直両朝革価式確村提運終挙果西勢減台広容必応演電歳住争談能無再位置企真流",
    "格有疑口過局少放税検藤町常校料沢裁状工建語球営空職証土与急止送援供可役構木割聞身",
    "費付施切由説転食比難防補車優夫研収断井何南石足違消境神番規術護展態導鮮備宅害配副",
    "算視条幹独警宮究育席輸訪楽起万着乗店述残想線率病農州武声質念待試族象銀域助労例衛",
    "然早張映限親額監環験追審商葉義伝働形景落欧担好退準賞訴辺造英被株頭技低毎医復仕去",
    "姿味負閣韓渡失移差衆個門写評課末守若脳極種美岡影命含福蔵量望松非撃佐核観察整段横",
    "融型白深字答夜製票況音申様財港識注呼渉達良響阪帰針専推谷古候史天階程満敗管値歌買",
    "突兵接請器士光討路悪科攻崎督授催細効図週積丸他及湾録処省旧室憲太橋歩離岸客風紙激",
    "否周師摘材登系郎母易健黒火戸速存花春飛殺央券赤号単盟座青破編捜竹除完降超責並療従",
    "右修捕隊危採織森競拡故館振給屋介読弁根色友苦就迎走販園具左異歴辞将秋因献厳馬愛幅",
    "休維富浜父遺彼般未塁貿講邦舞林装諸夏素亡劇河遣航抗冷模雄適婦鉄寄益込顔緊類児余禁",
    "印逆王返標換久短油妻暴輪占宣背昭廃植熱宿薬伊江清習険頼僚覚吉盛船倍均億途圧芸許皇",
    "臨踏駅署抜壊債便伸留罪停興爆陸玉源儀波創障継筋狙帯延羽努固闘精則葬乱避普散司康測",
    "豊洋静善逮婚厚喜齢囲卒迫略承浮惑崩順紀聴脱旅絶級幸岩練押軽倒了庁博城患締等救執層",
    "版老令角絡損房募曲撤裏払削密庭徒措仏績築貨志混載昇池陣我勤為血遅抑幕居染温雑招奈",
    "季困星傷永択秀著徴誌庫弾償刊像功拠香欠更秘拒刑坂刻底賛塚致抱繰服犯尾描布恐寺鈴盤",
    "息宇項喪伴遠養懸戻街巨震願絵希越契掲躍棄欲痛触邸依籍汚縮還枚属笑互複慮郵束仲栄札",
    "枠似夕恵板列露沖探逃借緩節需骨射傾届曜遊迷夢巻購揮君燃充雨閉緒跡包駐貢鹿弱却端賃",
    "折紹獲郡併草徹飲貴埼衝焦奪雇災浦暮替析預焼簡譲称肉納樹挑章臓律誘紛貸至宗促慎控",
);

/// Hiragana followed by katakana, basic syllabary only.
const KANA: &str = concat!(
    "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん",
    "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン",
);

/// Single-code-point emoji (no variation selectors or joiners).
const EMOJI: &str = "😊😭🐦🐻🐱🌲😀🙏💪👍🚀🚩🏆🎯🏁📣📢🔊🔔🌷🌱🌈";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A named, immutable set of code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// `a-z`, `l` only when ambiguous glyphs are allowed.
    Lowercase,
    /// `A-Z`, `I` and `O` only when ambiguous glyphs are allowed.
    Uppercase,
    /// `2-9`, `0` and `1` only when ambiguous glyphs are allowed.
    Number,
    /// ASCII symbols.
    Special,
    /// Common CJK ideographs.
    Ideograph,
    /// Hiragana and katakana.
    Kana,
    /// Emoji.
    Emoji,
}

impl CharacterClass {
    /// Every class, in slot-assignment order.
    pub const ALL: [Self; 7] = [
        Self::Lowercase,
        Self::Uppercase,
        Self::Number,
        Self::Special,
        Self::Ideograph,
        Self::Kana,
        Self::Emoji,
    ];

    /// Code points of this class.
    #[must_use]
    pub fn chars(self, allow_ambiguous: bool) -> Vec<char> {
        let (base, ambiguous) = match self {
            Self::Lowercase => (LOWERCASE, LOWERCASE_AMBIGUOUS),
            Self::Uppercase => (UPPERCASE, UPPERCASE_AMBIGUOUS),
            Self::Number => (NUMBERS, NUMBERS_AMBIGUOUS),
            Self::Special => (SPECIAL, ""),
            Self::Ideograph => (IDEOGRAPHS, ""),
            Self::Kana => (KANA, ""),
            Self::Emoji => (EMOJI, ""),
        };
        let mut set: Vec<char> = base.chars().collect();
        if allow_ambiguous {
            set.extend(ambiguous.chars());
        }
        set
    }

    /// Whether `c` belongs to this class (ambiguous glyphs included).
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        self.chars(true).contains(&c)
    }

    /// Whether `options` enables this class.
    #[must_use]
    pub const fn is_enabled(self, options: &GenerationOptions) -> bool {
        match self {
            Self::Lowercase => options.lowercase,
            Self::Uppercase => options.uppercase,
            Self::Number => options.number,
            Self::Special => options.special,
            Self::Ideograph => options.ideographs,
            Self::Kana => options.kana,
            Self::Emoji => options.emoji,
        }
    }

    /// The guaranteed count `options` asks for in this class.
    #[must_use]
    pub const fn minimum(self, options: &GenerationOptions) -> u32 {
        match self {
            Self::Lowercase => options.min_lowercase,
            Self::Uppercase => options.min_uppercase,
            Self::Number => options.min_number,
            Self::Special => options.min_special,
            Self::Ideograph => options.min_ideographs,
            Self::Kana => options.min_kana,
            Self::Emoji => options.min_emoji,
        }
    }

    /// Overwrite the guaranteed count for this class.
    pub fn set_minimum(self, options: &mut GenerationOptions, value: u32) {
        let field = match self {
            Self::Lowercase => &mut options.min_lowercase,
            Self::Uppercase => &mut options.min_uppercase,
            Self::Number => &mut options.min_number,
            Self::Special => &mut options.min_special,
            Self::Ideograph => &mut options.min_ideographs,
            Self::Kana => &mut options.min_kana,
            Self::Emoji => &mut options.min_emoji,
        };
        *field = value;
    }
}

/// What a single password position must be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotTag {
    /// A guaranteed character of one class.
    Class(CharacterClass),
    /// Any enabled class.
    Any,
}

impl SlotTag {
    /// Code points this slot samples from under `options`.
    ///
    /// [`SlotTag::Any`] is the union of all enabled classes in catalog order.
    #[must_use]
    pub fn resolve(self, options: &GenerationOptions) -> Vec<char> {
        match self {
            Self::Class(class) => class.chars(options.allow_ambiguous),
            Self::Any => CharacterClass::ALL
                .iter()
                .filter(|class| class.is_enabled(options))
                .flat_map(|class| class.chars(options.allow_ambiguous))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ambiguous_glyphs_excluded_by_default() {
        let lower = CharacterClass::Lowercase.chars(false);
        let upper = CharacterClass::Uppercase.chars(false);
        let digits = CharacterClass::Number.chars(false);
        assert!(!lower.contains(&'l'));
        assert!(!upper.contains(&'I') && !upper.contains(&'O'));
        assert!(!digits.contains(&'0') && !digits.contains(&'1'));
        assert_eq!(lower.len(), 25);
        assert_eq!(upper.len(), 24);
        assert_eq!(digits.len(), 8);
    }

    #[test]
    fn ambiguous_glyphs_included_when_allowed() {
        assert_eq!(CharacterClass::Lowercase.chars(true).len(), 26);
        assert_eq!(CharacterClass::Uppercase.chars(true).len(), 26);
        assert_eq!(CharacterClass::Number.chars(true).len(), 10);
    }

    #[test]
    fn no_class_has_duplicate_code_points() {
        for class in CharacterClass::ALL {
            let set = class.chars(true);
            let unique: HashSet<char> = set.iter().copied().collect();
            assert_eq!(unique.len(), set.len(), "{class:?} has duplicates");
        }
    }

    #[test]
    fn classes_are_disjoint() {
        let mut seen = HashSet::new();
        for class in CharacterClass::ALL {
            for c in class.chars(true) {
                assert!(seen.insert(c), "{c} appears in more than one class");
            }
        }
    }

    #[test]
    fn wide_classes_are_multi_byte() {
        for class in [
            CharacterClass::Ideograph,
            CharacterClass::Kana,
            CharacterClass::Emoji,
        ] {
            assert!(class.chars(false).iter().all(|c| c.len_utf8() > 1));
        }
        assert_eq!(CharacterClass::Ideograph.chars(false).len(), 999);
        assert_eq!(CharacterClass::Kana.chars(false).len(), 92);
        assert_eq!(CharacterClass::Emoji.chars(false).len(), 22);
    }

    #[test]
    fn any_tag_unions_enabled_classes_only() {
        let options = GenerationOptions {
            lowercase: false,
            uppercase: false,
            number: true,
            emoji: true,
            ..GenerationOptions::default()
        };
        let any = SlotTag::Any.resolve(&options);
        assert_eq!(any.len(), 8 + 22);
        assert!(any.iter().all(|c| {
            CharacterClass::Number.contains(*c) || CharacterClass::Emoji.contains(*c)
        }));
    }

    #[test]
    fn any_tag_respects_ambiguous_flag() {
        let options = GenerationOptions {
            allow_ambiguous: true,
            ..GenerationOptions::default()
        };
        let any = SlotTag::Any.resolve(&options);
        assert!(any.contains(&'l') && any.contains(&'O') && any.contains(&'1'));
    }

    #[test]
    fn minimum_accessors_agree() {
        let mut options = GenerationOptions::default();
        for (i, class) in CharacterClass::ALL.into_iter().enumerate() {
            let value = u32::try_from(i).unwrap() + 10;
            class.set_minimum(&mut options, value);
            assert_eq!(class.minimum(&options), value);
        }
        assert_eq!(options.min_emoji, 16);
    }
}
