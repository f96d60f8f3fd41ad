//! Built-in types, properties, strings and assemblies.
//!
//! Known entries are addressed by negative ids: the known type with index `n` is written as type
//! id `-n`, and likewise for properties and strings. Every index is declared next to its entry
//! and never derived from table position.
//!
//! - [`KNOWN_TYPES`] is sorted by short name with ordinal comparison, indices run from 1 without
//!   gaps.
//! - [`KNOWN_PROPERTIES`] holds two runs: dependency properties up to index 136 and content
//!   properties from 138. Index 137 is never assigned. Each run is sorted by owner index, then
//!   by property name.
//! - [`KNOWN_CONVERTERS`] pairs a known type with the known converter type used for its text
//!   values, sorted by type index.
//!
//! A short-name match alone does not identify a known type: namespace and assembly must match as
//! well, see [`KnownTables::find_type`].

use crate::baml::resolver::simple_assembly_name;

/// Assemblies that known types live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownAssembly {
    /// `PresentationFramework`, also the assembly with id -1
    PresentationFramework,
    /// `PresentationCore`
    PresentationCore,
    /// `WindowsBase`
    WindowsBase,
    /// `System.Xaml`
    SystemXaml,
    /// `System`
    System,
    /// `mscorlib`
    Mscorlib,
}

impl KnownAssembly {
    /// Simple assembly name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KnownAssembly::PresentationFramework => "PresentationFramework",
            KnownAssembly::PresentationCore => "PresentationCore",
            KnownAssembly::WindowsBase => "WindowsBase",
            KnownAssembly::SystemXaml => "System.Xaml",
            KnownAssembly::System => "System",
            KnownAssembly::Mscorlib => "mscorlib",
        }
    }

    /// Fully qualified assembly name.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            KnownAssembly::PresentationFramework => {
                "PresentationFramework, Version=4.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35"
            }
            KnownAssembly::PresentationCore => {
                "PresentationCore, Version=4.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35"
            }
            KnownAssembly::WindowsBase => {
                "WindowsBase, Version=4.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35"
            }
            KnownAssembly::SystemXaml => {
                "System.Xaml, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
            }
            KnownAssembly::System => {
                "System, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
            }
            KnownAssembly::Mscorlib => {
                "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
            }
        }
    }
}

/// A built-in type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownType {
    /// One-based index; the wire id is the negated index
    pub index: u16,
    /// Short type name
    pub name: &'static str,
    /// Namespace of the type
    pub namespace: &'static str,
    /// Defining assembly
    pub assembly: KnownAssembly,
}

impl KnownType {
    /// The negative wire id.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn id(&self) -> i16 {
        -(self.index as i16)
    }

    /// Namespace-qualified name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

/// A built-in property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownProperty {
    /// One-based index; the wire id is the negated index
    pub index: u16,
    /// Index of the declaring known type
    pub owner: u16,
    /// Property name
    pub name: &'static str,
}

impl KnownProperty {
    /// The negative wire id.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn id(&self) -> i16 {
        -(self.index as i16)
    }

    /// The negative wire id of the declaring type.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn owner_id(&self) -> i16 {
        -(self.owner as i16)
    }
}

/// A known type and the converter for its text values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownConverter {
    /// Index of the converted type
    pub target: u16,
    /// Index of the converter type
    pub converter: u16,
}

macro_rules! known_types {
    ($($index:literal $name:ident $namespace:literal $assembly:ident;)*) => {
        /// Known types, sorted by short name.
        pub static KNOWN_TYPES: &[KnownType] = &[
            $(KnownType {
                index: $index,
                name: stringify!($name),
                namespace: $namespace,
                assembly: KnownAssembly::$assembly,
            },)*
        ];
    };
}

macro_rules! known_properties {
    ($($index:literal $owner:literal $name:ident;)*) => {
        /// Known properties, two runs each sorted by owner index and name.
        pub static KNOWN_PROPERTIES: &[KnownProperty] = &[
            $(KnownProperty {
                index: $index,
                owner: $owner,
                name: stringify!($name),
            },)*
        ];
    };
}

macro_rules! known_converters {
    ($($target:literal => $converter:literal;)*) => {
        /// Converters of known types, sorted by type index.
        pub static KNOWN_CONVERTERS: &[KnownConverter] = &[
            $(KnownConverter {
                target: $target,
                converter: $converter,
            },)*
        ];
    };
}

/// Known strings; `KNOWN_STRINGS[n - 1]` has id `-n`.
pub static KNOWN_STRINGS: &[&str] = &["Name", "Uid"];

known_types! {
    1 AccessText "System.Windows.Controls" PresentationFramework;
    2 AdornedElementPlaceholder "System.Windows.Controls" PresentationFramework;
    3 Adorner "System.Windows.Documents" PresentationFramework;
    4 AdornerDecorator "System.Windows.Documents" PresentationFramework;
    5 AdornerLayer "System.Windows.Documents" PresentationFramework;
    6 AffineTransform3D "System.Windows.Media.Media3D" PresentationCore;
    7 AmbientLight "System.Windows.Media.Media3D" PresentationCore;
    8 AnchoredBlock "System.Windows.Documents" PresentationFramework;
    9 Animatable "System.Windows.Media.Animation" PresentationCore;
    10 AnimationClock "System.Windows.Media.Animation" PresentationCore;
    11 AnimationTimeline "System.Windows.Media.Animation" PresentationCore;
    12 Application "System.Windows" PresentationFramework;
    13 ArcSegment "System.Windows.Media" PresentationCore;
    14 ArrayExtension "System.Windows.Markup" SystemXaml;
    15 AxisAngleRotation3D "System.Windows.Media.Media3D" PresentationCore;
    16 BaseIListConverter "System.Windows.Media.Converters" PresentationCore;
    17 BeginStoryboard "System.Windows.Media.Animation" PresentationFramework;
    18 BevelBitmapEffect "System.Windows.Media.Effects" PresentationCore;
    19 BezierSegment "System.Windows.Media" PresentationCore;
    20 Binding "System.Windows.Data" PresentationFramework;
    21 BindingBase "System.Windows.Data" PresentationFramework;
    22 BindingExpression "System.Windows.Data" PresentationFramework;
    23 BindingExpressionBase "System.Windows.Data" PresentationFramework;
    24 BindingListCollectionView "System.Windows.Data" PresentationFramework;
    25 BitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    26 BitmapEffect "System.Windows.Media.Effects" PresentationCore;
    27 BitmapEffectCollection "System.Windows.Media.Effects" PresentationCore;
    28 BitmapEffectGroup "System.Windows.Media.Effects" PresentationCore;
    29 BitmapEffectInput "System.Windows.Media.Effects" PresentationCore;
    30 BitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    31 BitmapFrame "System.Windows.Media.Imaging" PresentationCore;
    32 BitmapImage "System.Windows.Media.Imaging" PresentationCore;
    33 BitmapMetadata "System.Windows.Media.Imaging" PresentationCore;
    34 BitmapPalette "System.Windows.Media.Imaging" PresentationCore;
    35 BitmapSource "System.Windows.Media.Imaging" PresentationCore;
    36 Block "System.Windows.Documents" PresentationFramework;
    37 BlockUIContainer "System.Windows.Documents" PresentationFramework;
    38 BlurBitmapEffect "System.Windows.Media.Effects" PresentationCore;
    39 BmpBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    40 BmpBitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    41 Bold "System.Windows.Documents" PresentationFramework;
    42 BoolIListConverter "System.Windows.Media.Converters" PresentationCore;
    43 Boolean "System" Mscorlib;
    44 BooleanAnimationBase "System.Windows.Media.Animation" PresentationCore;
    45 BooleanAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    46 BooleanConverter "System.ComponentModel" System;
    47 BooleanKeyFrame "System.Windows.Media.Animation" PresentationCore;
    48 BooleanKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    49 BooleanToVisibilityConverter "System.Windows.Controls" PresentationFramework;
    50 Border "System.Windows.Controls" PresentationFramework;
    51 BorderGapMaskConverter "System.Windows.Controls" PresentationFramework;
    52 Brush "System.Windows.Media" PresentationCore;
    53 BrushConverter "System.Windows.Media" PresentationCore;
    54 BulletDecorator "System.Windows.Controls.Primitives" PresentationFramework;
    55 Button "System.Windows.Controls" PresentationFramework;
    56 ButtonBase "System.Windows.Controls.Primitives" PresentationFramework;
    57 Byte "System" Mscorlib;
    58 ByteAnimation "System.Windows.Media.Animation" PresentationCore;
    59 ByteAnimationBase "System.Windows.Media.Animation" PresentationCore;
    60 ByteAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    61 ByteConverter "System.ComponentModel" System;
    62 ByteKeyFrame "System.Windows.Media.Animation" PresentationCore;
    63 ByteKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    64 CachedBitmap "System.Windows.Media.Imaging" PresentationCore;
    65 Camera "System.Windows.Media.Media3D" PresentationCore;
    66 Canvas "System.Windows.Controls" PresentationFramework;
    67 Char "System" Mscorlib;
    68 CharAnimationBase "System.Windows.Media.Animation" PresentationCore;
    69 CharAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    70 CharConverter "System.ComponentModel" System;
    71 CharIListConverter "System.Windows.Media.Converters" PresentationCore;
    72 CharKeyFrame "System.Windows.Media.Animation" PresentationCore;
    73 CharKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    74 CheckBox "System.Windows.Controls" PresentationFramework;
    75 Clock "System.Windows.Media.Animation" PresentationCore;
    76 ClockController "System.Windows.Media.Animation" PresentationCore;
    77 ClockGroup "System.Windows.Media.Animation" PresentationCore;
    78 CollectionContainer "System.Windows.Data" PresentationFramework;
    79 CollectionView "System.Windows.Data" PresentationFramework;
    80 CollectionViewSource "System.Windows.Data" PresentationFramework;
    81 Color "System.Windows.Media" PresentationCore;
    82 ColorAnimation "System.Windows.Media.Animation" PresentationCore;
    83 ColorAnimationBase "System.Windows.Media.Animation" PresentationCore;
    84 ColorAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    85 ColorConvertedBitmap "System.Windows.Media.Imaging" PresentationCore;
    86 ColorConvertedBitmapExtension "System.Windows" PresentationFramework;
    87 ColorConverter "System.Windows.Media" PresentationCore;
    88 ColorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    89 ColorKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    90 ColumnDefinition "System.Windows.Controls" PresentationFramework;
    91 CombinedGeometry "System.Windows.Media" PresentationCore;
    92 ComboBox "System.Windows.Controls" PresentationFramework;
    93 ComboBoxItem "System.Windows.Controls" PresentationFramework;
    94 CommandConverter "System.Windows.Input" PresentationCore;
    95 ComponentResourceKey "System.Windows" PresentationFramework;
    96 ComponentResourceKeyConverter "System.Windows" PresentationFramework;
    97 CompositionTarget "System.Windows.Media" PresentationCore;
    98 Condition "System.Windows" PresentationFramework;
    99 ContainerVisual "System.Windows.Media" PresentationCore;
    100 ContentControl "System.Windows.Controls" PresentationFramework;
    101 ContentElement "System.Windows" PresentationCore;
    102 ContentPresenter "System.Windows.Controls" PresentationFramework;
    103 ContentPropertyAttribute "System.Windows.Markup" SystemXaml;
    104 ContentWrapperAttribute "System.Windows.Markup" SystemXaml;
    105 ContextMenu "System.Windows.Controls" PresentationFramework;
    106 ContextMenuService "System.Windows.Controls" PresentationFramework;
    107 Control "System.Windows.Controls" PresentationFramework;
    108 ControlTemplate "System.Windows.Controls" PresentationFramework;
    109 ControllableStoryboardAction "System.Windows.Media.Animation" PresentationFramework;
    110 CornerRadius "System.Windows" PresentationFramework;
    111 CornerRadiusConverter "System.Windows" PresentationFramework;
    112 CroppedBitmap "System.Windows.Media.Imaging" PresentationCore;
    113 CultureInfo "System.Globalization" Mscorlib;
    114 CultureInfoConverter "System.ComponentModel" System;
    115 CultureInfoIetfLanguageTagConverter "System.Windows" PresentationCore;
    116 Cursor "System.Windows.Input" PresentationCore;
    117 CursorConverter "System.Windows.Input" PresentationCore;
    118 DashStyle "System.Windows.Media" PresentationCore;
    119 DataChangedEventManager "System.Windows.Data" PresentationFramework;
    120 DataTemplate "System.Windows" PresentationFramework;
    121 DataTemplateKey "System.Windows" PresentationFramework;
    122 DataTrigger "System.Windows" PresentationFramework;
    123 DateTime "System" Mscorlib;
    124 DateTimeConverter "System.ComponentModel" System;
    125 DateTimeConverter2 "System.Windows.Markup" WindowsBase;
    126 Decimal "System" Mscorlib;
    127 DecimalAnimation "System.Windows.Media.Animation" PresentationCore;
    128 DecimalAnimationBase "System.Windows.Media.Animation" PresentationCore;
    129 DecimalAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    130 DecimalConverter "System.ComponentModel" System;
    131 DecimalKeyFrame "System.Windows.Media.Animation" PresentationCore;
    132 DecimalKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    133 Decorator "System.Windows.Controls" PresentationFramework;
    134 DefinitionBase "System.Windows.Controls" PresentationFramework;
    135 DependencyObject "System.Windows" WindowsBase;
    136 DependencyProperty "System.Windows" WindowsBase;
    137 DependencyPropertyConverter "System.Windows.Markup" PresentationFramework;
    138 DialogResultConverter "System.Windows" PresentationFramework;
    139 DiffuseMaterial "System.Windows.Media.Media3D" PresentationCore;
    140 DirectionalLight "System.Windows.Media.Media3D" PresentationCore;
    141 DiscreteBooleanKeyFrame "System.Windows.Media.Animation" PresentationCore;
    142 DiscreteByteKeyFrame "System.Windows.Media.Animation" PresentationCore;
    143 DiscreteCharKeyFrame "System.Windows.Media.Animation" PresentationCore;
    144 DiscreteColorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    145 DiscreteDecimalKeyFrame "System.Windows.Media.Animation" PresentationCore;
    146 DiscreteDoubleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    147 DiscreteInt16KeyFrame "System.Windows.Media.Animation" PresentationCore;
    148 DiscreteInt32KeyFrame "System.Windows.Media.Animation" PresentationCore;
    149 DiscreteInt64KeyFrame "System.Windows.Media.Animation" PresentationCore;
    150 DiscreteMatrixKeyFrame "System.Windows.Media.Animation" PresentationCore;
    151 DiscreteObjectKeyFrame "System.Windows.Media.Animation" PresentationCore;
    152 DiscretePoint3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    153 DiscretePointKeyFrame "System.Windows.Media.Animation" PresentationCore;
    154 DiscreteQuaternionKeyFrame "System.Windows.Media.Animation" PresentationCore;
    155 DiscreteRectKeyFrame "System.Windows.Media.Animation" PresentationCore;
    156 DiscreteRotation3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    157 DiscreteSingleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    158 DiscreteSizeKeyFrame "System.Windows.Media.Animation" PresentationCore;
    159 DiscreteStringKeyFrame "System.Windows.Media.Animation" PresentationCore;
    160 DiscreteThicknessKeyFrame "System.Windows.Media.Animation" PresentationFramework;
    161 DiscreteVector3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    162 DiscreteVectorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    163 DockPanel "System.Windows.Controls" PresentationFramework;
    164 DocumentPageView "System.Windows.Controls.Primitives" PresentationFramework;
    165 DocumentReference "System.Windows.Documents" PresentationFramework;
    166 DocumentViewer "System.Windows.Controls" PresentationFramework;
    167 DocumentViewerBase "System.Windows.Controls.Primitives" PresentationFramework;
    168 Double "System" Mscorlib;
    169 DoubleAnimation "System.Windows.Media.Animation" PresentationCore;
    170 DoubleAnimationBase "System.Windows.Media.Animation" PresentationCore;
    171 DoubleAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    172 DoubleAnimationUsingPath "System.Windows.Media.Animation" PresentationCore;
    173 DoubleCollection "System.Windows.Media" PresentationCore;
    174 DoubleCollectionConverter "System.Windows.Media" PresentationCore;
    175 DoubleConverter "System.ComponentModel" System;
    176 DoubleIListConverter "System.Windows.Media.Converters" PresentationCore;
    177 DoubleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    178 DoubleKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    179 Drawing "System.Windows.Media" PresentationCore;
    180 DrawingBrush "System.Windows.Media" PresentationCore;
    181 DrawingCollection "System.Windows.Media" PresentationCore;
    182 DrawingContext "System.Windows.Media" PresentationCore;
    183 DrawingGroup "System.Windows.Media" PresentationCore;
    184 DrawingImage "System.Windows.Media" PresentationCore;
    185 DrawingVisual "System.Windows.Media" PresentationCore;
    186 DropShadowBitmapEffect "System.Windows.Media.Effects" PresentationCore;
    187 Duration "System.Windows" PresentationCore;
    188 DurationConverter "System.Windows" PresentationCore;
    189 DynamicResourceExtension "System.Windows" PresentationFramework;
    190 DynamicResourceExtensionConverter "System.Windows" PresentationFramework;
    191 Ellipse "System.Windows.Shapes" PresentationFramework;
    192 EllipseGeometry "System.Windows.Media" PresentationCore;
    193 EmbossBitmapEffect "System.Windows.Media.Effects" PresentationCore;
    194 EmissiveMaterial "System.Windows.Media.Media3D" PresentationCore;
    195 EnumConverter "System.ComponentModel" System;
    196 EventManager "System.Windows" PresentationCore;
    197 EventSetter "System.Windows" PresentationFramework;
    198 EventTrigger "System.Windows" PresentationFramework;
    199 Expander "System.Windows.Controls" PresentationFramework;
    200 Expression "System.Windows" WindowsBase;
    201 ExpressionConverter "System.Windows" WindowsBase;
    202 Figure "System.Windows.Documents" PresentationFramework;
    203 FigureLength "System.Windows" PresentationFramework;
    204 FigureLengthConverter "System.Windows" PresentationFramework;
    205 FixedDocument "System.Windows.Documents" PresentationFramework;
    206 FixedDocumentSequence "System.Windows.Documents" PresentationFramework;
    207 FixedPage "System.Windows.Documents" PresentationFramework;
    208 Floater "System.Windows.Documents" PresentationFramework;
    209 FlowDocument "System.Windows.Documents" PresentationFramework;
    210 FlowDocumentPageViewer "System.Windows.Controls" PresentationFramework;
    211 FlowDocumentReader "System.Windows.Controls" PresentationFramework;
    212 FlowDocumentScrollViewer "System.Windows.Controls" PresentationFramework;
    213 FocusManager "System.Windows.Input" PresentationCore;
    214 FontFamily "System.Windows.Media" PresentationCore;
    215 FontFamilyConverter "System.Windows.Media" PresentationCore;
    216 FontSizeConverter "System.Windows" PresentationFramework;
    217 FontStretch "System.Windows" PresentationCore;
    218 FontStretchConverter "System.Windows" PresentationCore;
    219 FontStyle "System.Windows" PresentationCore;
    220 FontStyleConverter "System.Windows" PresentationCore;
    221 FontWeight "System.Windows" PresentationCore;
    222 FontWeightConverter "System.Windows" PresentationCore;
    223 FormatConvertedBitmap "System.Windows.Media.Imaging" PresentationCore;
    224 Frame "System.Windows.Controls" PresentationFramework;
    225 FrameworkContentElement "System.Windows" PresentationFramework;
    226 FrameworkElement "System.Windows" PresentationFramework;
    227 FrameworkElementFactory "System.Windows" PresentationFramework;
    228 FrameworkPropertyMetadata "System.Windows" PresentationFramework;
    229 FrameworkPropertyMetadataOptions "System.Windows" PresentationFramework;
    230 FrameworkRichTextComposition "System.Windows.Documents" PresentationFramework;
    231 FrameworkTemplate "System.Windows" PresentationFramework;
    232 FrameworkTextComposition "System.Windows.Documents" PresentationFramework;
    233 Freezable "System.Windows" WindowsBase;
    234 GeneralTransform "System.Windows.Media" PresentationCore;
    235 GeneralTransformCollection "System.Windows.Media" PresentationCore;
    236 GeneralTransformGroup "System.Windows.Media" PresentationCore;
    237 Geometry "System.Windows.Media" PresentationCore;
    238 Geometry3D "System.Windows.Media.Media3D" PresentationCore;
    239 GeometryCollection "System.Windows.Media" PresentationCore;
    240 GeometryConverter "System.Windows.Media" PresentationCore;
    241 GeometryDrawing "System.Windows.Media" PresentationCore;
    242 GeometryGroup "System.Windows.Media" PresentationCore;
    243 GeometryModel3D "System.Windows.Media.Media3D" PresentationCore;
    244 GestureRecognizer "System.Windows.Ink" PresentationCore;
    245 GifBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    246 GifBitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    247 GlyphRun "System.Windows.Media" PresentationCore;
    248 GlyphRunDrawing "System.Windows.Media" PresentationCore;
    249 GlyphTypeface "System.Windows.Media" PresentationCore;
    250 Glyphs "System.Windows.Documents" PresentationFramework;
    251 GradientBrush "System.Windows.Media" PresentationCore;
    252 GradientStop "System.Windows.Media" PresentationCore;
    253 GradientStopCollection "System.Windows.Media" PresentationCore;
    254 Grid "System.Windows.Controls" PresentationFramework;
    255 GridLength "System.Windows" PresentationFramework;
    256 GridLengthConverter "System.Windows" PresentationFramework;
    257 GridSplitter "System.Windows.Controls" PresentationFramework;
    258 GridView "System.Windows.Controls" PresentationFramework;
    259 GridViewColumn "System.Windows.Controls" PresentationFramework;
    260 GridViewColumnHeader "System.Windows.Controls" PresentationFramework;
    261 GridViewHeaderRowPresenter "System.Windows.Controls" PresentationFramework;
    262 GridViewRowPresenter "System.Windows.Controls" PresentationFramework;
    263 GridViewRowPresenterBase "System.Windows.Controls" PresentationFramework;
    264 GroupBox "System.Windows.Controls" PresentationFramework;
    265 GroupItem "System.Windows.Controls" PresentationFramework;
    266 Guid "System" Mscorlib;
    267 GuidConverter "System.ComponentModel" System;
    268 GuidelineSet "System.Windows.Media" PresentationCore;
    269 HeaderedContentControl "System.Windows.Controls" PresentationFramework;
    270 HeaderedItemsControl "System.Windows.Controls" PresentationFramework;
    271 HierarchicalDataTemplate "System.Windows" PresentationFramework;
    272 HostVisual "System.Windows.Media" PresentationCore;
    273 Hyperlink "System.Windows.Documents" PresentationFramework;
    274 IAddChild "System.Windows.Markup" PresentationCore;
    275 IAddChildInternal "System.Windows.Markup" PresentationCore;
    276 ICommand "System.Windows.Input" System;
    277 IComponentConnector "System.Windows.Markup" SystemXaml;
    278 INameScope "System.Windows.Markup" SystemXaml;
    279 IStyleConnector "System.Windows.Markup" PresentationFramework;
    280 IconBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    281 Image "System.Windows.Controls" PresentationFramework;
    282 ImageBrush "System.Windows.Media" PresentationCore;
    283 ImageDrawing "System.Windows.Media" PresentationCore;
    284 ImageMetadata "System.Windows.Media" PresentationCore;
    285 ImageSource "System.Windows.Media" PresentationCore;
    286 ImageSourceConverter "System.Windows.Media" PresentationCore;
    287 InPlaceBitmapMetadataWriter "System.Windows.Media.Imaging" PresentationCore;
    288 InkCanvas "System.Windows.Controls" PresentationFramework;
    289 InkPresenter "System.Windows.Controls" PresentationFramework;
    290 Inline "System.Windows.Documents" PresentationFramework;
    291 InlineCollection "System.Windows.Documents" PresentationFramework;
    292 InlineUIContainer "System.Windows.Documents" PresentationFramework;
    293 InputBinding "System.Windows.Input" PresentationCore;
    294 InputDevice "System.Windows.Input" PresentationCore;
    295 InputLanguageManager "System.Windows.Input" PresentationCore;
    296 InputManager "System.Windows.Input" PresentationCore;
    297 InputMethod "System.Windows.Input" PresentationCore;
    298 InputScope "System.Windows.Input" PresentationCore;
    299 InputScopeConverter "System.Windows.Input" PresentationCore;
    300 InputScopeName "System.Windows.Input" PresentationCore;
    301 InputScopeNameConverter "System.Windows.Input" PresentationCore;
    302 Int16 "System" Mscorlib;
    303 Int16Animation "System.Windows.Media.Animation" PresentationCore;
    304 Int16AnimationBase "System.Windows.Media.Animation" PresentationCore;
    305 Int16AnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    306 Int16Converter "System.ComponentModel" System;
    307 Int16KeyFrame "System.Windows.Media.Animation" PresentationCore;
    308 Int16KeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    309 Int32 "System" Mscorlib;
    310 Int32Animation "System.Windows.Media.Animation" PresentationCore;
    311 Int32AnimationBase "System.Windows.Media.Animation" PresentationCore;
    312 Int32AnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    313 Int32Collection "System.Windows.Media" PresentationCore;
    314 Int32CollectionConverter "System.Windows.Media" PresentationCore;
    315 Int32Converter "System.ComponentModel" System;
    316 Int32KeyFrame "System.Windows.Media.Animation" PresentationCore;
    317 Int32KeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    318 Int32Rect "System.Windows" WindowsBase;
    319 Int32RectConverter "System.Windows" WindowsBase;
    320 Int64 "System" Mscorlib;
    321 Int64Animation "System.Windows.Media.Animation" PresentationCore;
    322 Int64AnimationBase "System.Windows.Media.Animation" PresentationCore;
    323 Int64AnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    324 Int64Converter "System.ComponentModel" System;
    325 Int64KeyFrame "System.Windows.Media.Animation" PresentationCore;
    326 Int64KeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    327 Italic "System.Windows.Documents" PresentationFramework;
    328 ItemCollection "System.Windows.Controls" PresentationFramework;
    329 ItemsControl "System.Windows.Controls" PresentationFramework;
    330 ItemsPanelTemplate "System.Windows.Controls" PresentationFramework;
    331 ItemsPresenter "System.Windows.Controls" PresentationFramework;
    332 JournalEntry "System.Windows.Navigation" PresentationFramework;
    333 JournalEntryListConverter "System.Windows.Navigation" PresentationFramework;
    334 JournalEntryUnifiedViewConverter "System.Windows.Navigation" PresentationFramework;
    335 JpegBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    336 JpegBitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    337 KeyBinding "System.Windows.Input" PresentationCore;
    338 KeyConverter "System.Windows.Input" WindowsBase;
    339 KeyGesture "System.Windows.Input" PresentationCore;
    340 KeyGestureConverter "System.Windows.Input" PresentationCore;
    341 KeySpline "System.Windows.Media.Animation" PresentationCore;
    342 KeySplineConverter "System.Windows.Media.Animation" PresentationCore;
    343 KeyTime "System.Windows.Media.Animation" PresentationCore;
    344 KeyTimeConverter "System.Windows.Media.Animation" PresentationCore;
    345 KeyboardDevice "System.Windows.Input" PresentationCore;
    346 Label "System.Windows.Controls" PresentationFramework;
    347 LateBoundBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    348 LengthConverter "System.Windows" PresentationFramework;
    349 Light "System.Windows.Media.Media3D" PresentationCore;
    350 Line "System.Windows.Shapes" PresentationFramework;
    351 LineBreak "System.Windows.Documents" PresentationFramework;
    352 LineGeometry "System.Windows.Media" PresentationCore;
    353 LineSegment "System.Windows.Media" PresentationCore;
    354 LinearByteKeyFrame "System.Windows.Media.Animation" PresentationCore;
    355 LinearColorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    356 LinearDecimalKeyFrame "System.Windows.Media.Animation" PresentationCore;
    357 LinearDoubleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    358 LinearGradientBrush "System.Windows.Media" PresentationCore;
    359 LinearInt16KeyFrame "System.Windows.Media.Animation" PresentationCore;
    360 LinearInt32KeyFrame "System.Windows.Media.Animation" PresentationCore;
    361 LinearInt64KeyFrame "System.Windows.Media.Animation" PresentationCore;
    362 LinearPoint3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    363 LinearPointKeyFrame "System.Windows.Media.Animation" PresentationCore;
    364 LinearQuaternionKeyFrame "System.Windows.Media.Animation" PresentationCore;
    365 LinearRectKeyFrame "System.Windows.Media.Animation" PresentationCore;
    366 LinearRotation3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    367 LinearSingleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    368 LinearSizeKeyFrame "System.Windows.Media.Animation" PresentationCore;
    369 LinearThicknessKeyFrame "System.Windows.Media.Animation" PresentationFramework;
    370 LinearVector3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    371 LinearVectorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    372 List "System.Windows.Documents" PresentationFramework;
    373 ListBox "System.Windows.Controls" PresentationFramework;
    374 ListBoxItem "System.Windows.Controls" PresentationFramework;
    375 ListCollectionView "System.Windows.Data" PresentationFramework;
    376 ListItem "System.Windows.Documents" PresentationFramework;
    377 ListView "System.Windows.Controls" PresentationFramework;
    378 ListViewItem "System.Windows.Controls" PresentationFramework;
    379 Localization "System.Windows" PresentationFramework;
    380 LostFocusEventManager "System.Windows" PresentationFramework;
    381 MarkupExtension "System.Windows.Markup" SystemXaml;
    382 Material "System.Windows.Media.Media3D" PresentationCore;
    383 MaterialCollection "System.Windows.Media.Media3D" PresentationCore;
    384 MaterialGroup "System.Windows.Media.Media3D" PresentationCore;
    385 Matrix "System.Windows.Media" WindowsBase;
    386 Matrix3D "System.Windows.Media.Media3D" PresentationCore;
    387 Matrix3DConverter "System.Windows.Media.Media3D" PresentationCore;
    388 MatrixAnimationBase "System.Windows.Media.Animation" PresentationCore;
    389 MatrixAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    390 MatrixAnimationUsingPath "System.Windows.Media.Animation" PresentationCore;
    391 MatrixCamera "System.Windows.Media.Media3D" PresentationCore;
    392 MatrixConverter "System.Windows.Media" WindowsBase;
    393 MatrixKeyFrame "System.Windows.Media.Animation" PresentationCore;
    394 MatrixKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    395 MatrixTransform "System.Windows.Media" PresentationCore;
    396 MatrixTransform3D "System.Windows.Media.Media3D" PresentationCore;
    397 MediaClock "System.Windows.Media" PresentationCore;
    398 MediaElement "System.Windows.Controls" PresentationFramework;
    399 MediaPlayer "System.Windows.Media" PresentationCore;
    400 MediaTimeline "System.Windows.Media" PresentationCore;
    401 Menu "System.Windows.Controls" PresentationFramework;
    402 MenuBase "System.Windows.Controls.Primitives" PresentationFramework;
    403 MenuItem "System.Windows.Controls" PresentationFramework;
    404 MenuScrollingVisibilityConverter "System.Windows.Controls" PresentationFramework;
    405 MeshGeometry3D "System.Windows.Media.Media3D" PresentationCore;
    406 Model3D "System.Windows.Media.Media3D" PresentationCore;
    407 Model3DCollection "System.Windows.Media.Media3D" PresentationCore;
    408 Model3DGroup "System.Windows.Media.Media3D" PresentationCore;
    409 ModelVisual3D "System.Windows.Media.Media3D" PresentationCore;
    410 ModifierKeysConverter "System.Windows.Input" WindowsBase;
    411 MouseActionConverter "System.Windows.Input" PresentationCore;
    412 MouseBinding "System.Windows.Input" PresentationCore;
    413 MouseDevice "System.Windows.Input" PresentationCore;
    414 MouseGesture "System.Windows.Input" PresentationCore;
    415 MouseGestureConverter "System.Windows.Input" PresentationCore;
    416 MultiBinding "System.Windows.Data" PresentationFramework;
    417 MultiBindingExpression "System.Windows.Data" PresentationFramework;
    418 MultiDataTrigger "System.Windows" PresentationFramework;
    419 MultiTrigger "System.Windows" PresentationFramework;
    420 NameScope "System.Windows" WindowsBase;
    421 NavigationWindow "System.Windows.Navigation" PresentationFramework;
    422 NullExtension "System.Windows.Markup" SystemXaml;
    423 NullableBoolConverter "System.Windows" PresentationFramework;
    424 NullableConverter "System.ComponentModel" System;
    425 NumberSubstitution "System.Windows.Media" PresentationCore;
    426 Object "System" Mscorlib;
    427 ObjectAnimationBase "System.Windows.Media.Animation" PresentationCore;
    428 ObjectAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    429 ObjectDataProvider "System.Windows.Data" PresentationFramework;
    430 ObjectKeyFrame "System.Windows.Media.Animation" PresentationCore;
    431 ObjectKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    432 OrthographicCamera "System.Windows.Media.Media3D" PresentationCore;
    433 OuterGlowBitmapEffect "System.Windows.Media.Effects" PresentationCore;
    434 Page "System.Windows.Controls" PresentationFramework;
    435 PageContent "System.Windows.Documents" PresentationFramework;
    436 PageFunctionBase "System.Windows.Navigation" PresentationFramework;
    437 Panel "System.Windows.Controls" PresentationFramework;
    438 Paragraph "System.Windows.Documents" PresentationFramework;
    439 ParallelTimeline "System.Windows.Media.Animation" PresentationCore;
    440 ParserContext "System.Windows.Markup" PresentationFramework;
    441 PasswordBox "System.Windows.Controls" PresentationFramework;
    442 Path "System.Windows.Shapes" PresentationFramework;
    443 PathFigure "System.Windows.Media" PresentationCore;
    444 PathFigureCollection "System.Windows.Media" PresentationCore;
    445 PathFigureCollectionConverter "System.Windows.Media" PresentationCore;
    446 PathGeometry "System.Windows.Media" PresentationCore;
    447 PathSegment "System.Windows.Media" PresentationCore;
    448 PathSegmentCollection "System.Windows.Media" PresentationCore;
    449 PauseStoryboard "System.Windows.Media.Animation" PresentationFramework;
    450 Pen "System.Windows.Media" PresentationCore;
    451 PerspectiveCamera "System.Windows.Media.Media3D" PresentationCore;
    452 PixelFormat "System.Windows.Media" PresentationCore;
    453 PixelFormatConverter "System.Windows.Media" PresentationCore;
    454 PngBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    455 PngBitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    456 Point "System.Windows" WindowsBase;
    457 Point3D "System.Windows.Media.Media3D" PresentationCore;
    458 Point3DAnimation "System.Windows.Media.Animation" PresentationCore;
    459 Point3DAnimationBase "System.Windows.Media.Animation" PresentationCore;
    460 Point3DAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    461 Point3DCollection "System.Windows.Media.Media3D" PresentationCore;
    462 Point3DCollectionConverter "System.Windows.Media.Media3D" PresentationCore;
    463 Point3DConverter "System.Windows.Media.Media3D" PresentationCore;
    464 Point3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    465 Point3DKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    466 Point4D "System.Windows.Media.Media3D" PresentationCore;
    467 Point4DConverter "System.Windows.Media.Media3D" PresentationCore;
    468 PointAnimation "System.Windows.Media.Animation" PresentationCore;
    469 PointAnimationBase "System.Windows.Media.Animation" PresentationCore;
    470 PointAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    471 PointAnimationUsingPath "System.Windows.Media.Animation" PresentationCore;
    472 PointCollection "System.Windows.Media" PresentationCore;
    473 PointCollectionConverter "System.Windows.Media" PresentationCore;
    474 PointConverter "System.Windows" WindowsBase;
    475 PointIListConverter "System.Windows.Media.Converters" PresentationCore;
    476 PointKeyFrame "System.Windows.Media.Animation" PresentationCore;
    477 PointKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    478 PointLight "System.Windows.Media.Media3D" PresentationCore;
    479 PointLightBase "System.Windows.Media.Media3D" PresentationCore;
    480 PolyBezierSegment "System.Windows.Media" PresentationCore;
    481 PolyLineSegment "System.Windows.Media" PresentationCore;
    482 PolyQuadraticBezierSegment "System.Windows.Media" PresentationCore;
    483 Polygon "System.Windows.Shapes" PresentationFramework;
    484 Polyline "System.Windows.Shapes" PresentationFramework;
    485 Popup "System.Windows.Controls.Primitives" PresentationFramework;
    486 PresentationSource "System.Windows" PresentationCore;
    487 PriorityBinding "System.Windows.Data" PresentationFramework;
    488 PriorityBindingExpression "System.Windows.Data" PresentationFramework;
    489 ProgressBar "System.Windows.Controls" PresentationFramework;
    490 ProjectionCamera "System.Windows.Media.Media3D" PresentationCore;
    491 PropertyPath "System.Windows" PresentationFramework;
    492 PropertyPathConverter "System.Windows" PresentationFramework;
    493 QuadraticBezierSegment "System.Windows.Media" PresentationCore;
    494 Quaternion "System.Windows.Media.Media3D" PresentationCore;
    495 QuaternionAnimation "System.Windows.Media.Animation" PresentationCore;
    496 QuaternionAnimationBase "System.Windows.Media.Animation" PresentationCore;
    497 QuaternionAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    498 QuaternionConverter "System.Windows.Media.Media3D" PresentationCore;
    499 QuaternionKeyFrame "System.Windows.Media.Animation" PresentationCore;
    500 QuaternionKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    501 QuaternionRotation3D "System.Windows.Media.Media3D" PresentationCore;
    502 RadialGradientBrush "System.Windows.Media" PresentationCore;
    503 RadioButton "System.Windows.Controls" PresentationFramework;
    504 RangeBase "System.Windows.Controls.Primitives" PresentationFramework;
    505 Rect "System.Windows" WindowsBase;
    506 Rect3D "System.Windows.Media.Media3D" PresentationCore;
    507 Rect3DConverter "System.Windows.Media.Media3D" PresentationCore;
    508 RectAnimation "System.Windows.Media.Animation" PresentationCore;
    509 RectAnimationBase "System.Windows.Media.Animation" PresentationCore;
    510 RectAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    511 RectConverter "System.Windows" WindowsBase;
    512 RectKeyFrame "System.Windows.Media.Animation" PresentationCore;
    513 RectKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    514 Rectangle "System.Windows.Shapes" PresentationFramework;
    515 RectangleGeometry "System.Windows.Media" PresentationCore;
    516 RelativeSource "System.Windows.Data" PresentationFramework;
    517 RemoveStoryboard "System.Windows.Media.Animation" PresentationFramework;
    518 RenderOptions "System.Windows.Media" PresentationCore;
    519 RenderTargetBitmap "System.Windows.Media.Imaging" PresentationCore;
    520 RepeatBehavior "System.Windows.Media.Animation" PresentationCore;
    521 RepeatBehaviorConverter "System.Windows.Media.Animation" PresentationCore;
    522 RepeatButton "System.Windows.Controls.Primitives" PresentationFramework;
    523 ResizeGrip "System.Windows.Controls.Primitives" PresentationFramework;
    524 ResourceDictionary "System.Windows" PresentationFramework;
    525 ResourceKey "System.Windows" PresentationFramework;
    526 ResumeStoryboard "System.Windows.Media.Animation" PresentationFramework;
    527 RichTextBox "System.Windows.Controls" PresentationFramework;
    528 RotateTransform "System.Windows.Media" PresentationCore;
    529 RotateTransform3D "System.Windows.Media.Media3D" PresentationCore;
    530 Rotation3D "System.Windows.Media.Media3D" PresentationCore;
    531 Rotation3DAnimation "System.Windows.Media.Animation" PresentationCore;
    532 Rotation3DAnimationBase "System.Windows.Media.Animation" PresentationCore;
    533 Rotation3DAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    534 Rotation3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    535 Rotation3DKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    536 RoutedCommand "System.Windows.Input" PresentationCore;
    537 RoutedEvent "System.Windows" PresentationCore;
    538 RoutedEventConverter "System.Windows.Markup" PresentationFramework;
    539 RoutedUICommand "System.Windows.Input" PresentationCore;
    540 RoutingStrategy "System.Windows" PresentationCore;
    541 RowDefinition "System.Windows.Controls" PresentationFramework;
    542 Run "System.Windows.Documents" PresentationFramework;
    543 RuntimeNamePropertyAttribute "System.Windows.Markup" SystemXaml;
    544 SByte "System" Mscorlib;
    545 SByteConverter "System.ComponentModel" System;
    546 ScaleTransform "System.Windows.Media" PresentationCore;
    547 ScaleTransform3D "System.Windows.Media.Media3D" PresentationCore;
    548 ScrollBar "System.Windows.Controls.Primitives" PresentationFramework;
    549 ScrollContentPresenter "System.Windows.Controls" PresentationFramework;
    550 ScrollViewer "System.Windows.Controls" PresentationFramework;
    551 Section "System.Windows.Documents" PresentationFramework;
    552 SeekStoryboard "System.Windows.Media.Animation" PresentationFramework;
    553 Selector "System.Windows.Controls.Primitives" PresentationFramework;
    554 Separator "System.Windows.Controls" PresentationFramework;
    555 SetStoryboardSpeedRatio "System.Windows.Media.Animation" PresentationFramework;
    556 Setter "System.Windows" PresentationFramework;
    557 SetterBase "System.Windows" PresentationFramework;
    558 Shape "System.Windows.Shapes" PresentationFramework;
    559 Single "System" Mscorlib;
    560 SingleAnimation "System.Windows.Media.Animation" PresentationCore;
    561 SingleAnimationBase "System.Windows.Media.Animation" PresentationCore;
    562 SingleAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    563 SingleConverter "System.ComponentModel" System;
    564 SingleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    565 SingleKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    566 Size "System.Windows" WindowsBase;
    567 Size3D "System.Windows.Media.Media3D" PresentationCore;
    568 Size3DConverter "System.Windows.Media.Media3D" PresentationCore;
    569 SizeAnimation "System.Windows.Media.Animation" PresentationCore;
    570 SizeAnimationBase "System.Windows.Media.Animation" PresentationCore;
    571 SizeAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    572 SizeConverter "System.Windows" WindowsBase;
    573 SizeKeyFrame "System.Windows.Media.Animation" PresentationCore;
    574 SizeKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    575 SkewTransform "System.Windows.Media" PresentationCore;
    576 SkipStoryboardToFill "System.Windows.Media.Animation" PresentationFramework;
    577 Slider "System.Windows.Controls" PresentationFramework;
    578 SolidColorBrush "System.Windows.Media" PresentationCore;
    579 SoundPlayerAction "System.Windows.Controls" PresentationFramework;
    580 Span "System.Windows.Documents" PresentationFramework;
    581 SpecularMaterial "System.Windows.Media.Media3D" PresentationCore;
    582 SpellCheck "System.Windows.Controls" PresentationFramework;
    583 SplineByteKeyFrame "System.Windows.Media.Animation" PresentationCore;
    584 SplineColorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    585 SplineDecimalKeyFrame "System.Windows.Media.Animation" PresentationCore;
    586 SplineDoubleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    587 SplineInt16KeyFrame "System.Windows.Media.Animation" PresentationCore;
    588 SplineInt32KeyFrame "System.Windows.Media.Animation" PresentationCore;
    589 SplineInt64KeyFrame "System.Windows.Media.Animation" PresentationCore;
    590 SplinePoint3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    591 SplinePointKeyFrame "System.Windows.Media.Animation" PresentationCore;
    592 SplineQuaternionKeyFrame "System.Windows.Media.Animation" PresentationCore;
    593 SplineRectKeyFrame "System.Windows.Media.Animation" PresentationCore;
    594 SplineRotation3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    595 SplineSingleKeyFrame "System.Windows.Media.Animation" PresentationCore;
    596 SplineSizeKeyFrame "System.Windows.Media.Animation" PresentationCore;
    597 SplineThicknessKeyFrame "System.Windows.Media.Animation" PresentationFramework;
    598 SplineVector3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    599 SplineVectorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    600 SpotLight "System.Windows.Media.Media3D" PresentationCore;
    601 StackPanel "System.Windows.Controls" PresentationFramework;
    602 StaticExtension "System.Windows.Markup" SystemXaml;
    603 StaticResourceExtension "System.Windows" PresentationFramework;
    604 StatusBar "System.Windows.Controls.Primitives" PresentationFramework;
    605 StatusBarItem "System.Windows.Controls.Primitives" PresentationFramework;
    606 StickyNoteControl "System.Windows.Controls" PresentationFramework;
    607 StopStoryboard "System.Windows.Media.Animation" PresentationFramework;
    608 Storyboard "System.Windows.Media.Animation" PresentationFramework;
    609 StreamGeometry "System.Windows.Media" PresentationCore;
    610 StreamGeometryContext "System.Windows.Media" PresentationCore;
    611 StreamResourceInfo "System.Windows.Resources" PresentationFramework;
    612 String "System" Mscorlib;
    613 StringAnimationBase "System.Windows.Media.Animation" PresentationCore;
    614 StringAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    615 StringConverter "System.ComponentModel" System;
    616 StringKeyFrame "System.Windows.Media.Animation" PresentationCore;
    617 StringKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    618 StrokeCollection "System.Windows.Ink" PresentationCore;
    619 StrokeCollectionConverter "System.Windows" PresentationCore;
    620 Style "System.Windows" PresentationFramework;
    621 Stylus "System.Windows.Input" PresentationCore;
    622 StylusDevice "System.Windows.Input" PresentationCore;
    623 TabControl "System.Windows.Controls" PresentationFramework;
    624 TabItem "System.Windows.Controls" PresentationFramework;
    625 TabPanel "System.Windows.Controls.Primitives" PresentationFramework;
    626 Table "System.Windows.Documents" PresentationFramework;
    627 TableCell "System.Windows.Documents" PresentationFramework;
    628 TableColumn "System.Windows.Documents" PresentationFramework;
    629 TableRow "System.Windows.Documents" PresentationFramework;
    630 TableRowGroup "System.Windows.Documents" PresentationFramework;
    631 TabletDevice "System.Windows.Input" PresentationCore;
    632 TemplateBindingExpression "System.Windows" PresentationFramework;
    633 TemplateBindingExpressionConverter "System.Windows" PresentationFramework;
    634 TemplateBindingExtension "System.Windows" PresentationFramework;
    635 TemplateBindingExtensionConverter "System.Windows" PresentationFramework;
    636 TemplateKey "System.Windows" PresentationFramework;
    637 TemplateKeyConverter "System.Windows" PresentationFramework;
    638 TextBlock "System.Windows.Controls" PresentationFramework;
    639 TextBox "System.Windows.Controls" PresentationFramework;
    640 TextBoxBase "System.Windows.Controls.Primitives" PresentationFramework;
    641 TextComposition "System.Windows.Input" PresentationCore;
    642 TextCompositionManager "System.Windows.Input" PresentationCore;
    643 TextDecoration "System.Windows" PresentationCore;
    644 TextDecorationCollection "System.Windows" PresentationCore;
    645 TextDecorationCollectionConverter "System.Windows" PresentationCore;
    646 TextEffect "System.Windows.Media" PresentationCore;
    647 TextEffectCollection "System.Windows.Media" PresentationCore;
    648 TextElement "System.Windows.Documents" PresentationFramework;
    649 TextSearch "System.Windows.Controls" PresentationFramework;
    650 ThemeDictionaryExtension "System.Windows" PresentationFramework;
    651 Thickness "System.Windows" PresentationFramework;
    652 ThicknessAnimation "System.Windows.Media.Animation" PresentationFramework;
    653 ThicknessAnimationBase "System.Windows.Media.Animation" PresentationFramework;
    654 ThicknessAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationFramework;
    655 ThicknessConverter "System.Windows" PresentationFramework;
    656 ThicknessKeyFrame "System.Windows.Media.Animation" PresentationFramework;
    657 ThicknessKeyFrameCollection "System.Windows.Media.Animation" PresentationFramework;
    658 Thumb "System.Windows.Controls.Primitives" PresentationFramework;
    659 TickBar "System.Windows.Controls.Primitives" PresentationFramework;
    660 TiffBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    661 TiffBitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    662 TileBrush "System.Windows.Media" PresentationCore;
    663 TimeSpan "System" Mscorlib;
    664 TimeSpanConverter "System.ComponentModel" System;
    665 Timeline "System.Windows.Media.Animation" PresentationCore;
    666 TimelineCollection "System.Windows.Media.Animation" PresentationCore;
    667 TimelineGroup "System.Windows.Media.Animation" PresentationCore;
    668 ToggleButton "System.Windows.Controls.Primitives" PresentationFramework;
    669 ToolBar "System.Windows.Controls" PresentationFramework;
    670 ToolBarOverflowPanel "System.Windows.Controls.Primitives" PresentationFramework;
    671 ToolBarPanel "System.Windows.Controls.Primitives" PresentationFramework;
    672 ToolBarTray "System.Windows.Controls" PresentationFramework;
    673 ToolTip "System.Windows.Controls" PresentationFramework;
    674 ToolTipService "System.Windows.Controls" PresentationFramework;
    675 Track "System.Windows.Controls.Primitives" PresentationFramework;
    676 Transform "System.Windows.Media" PresentationCore;
    677 Transform3D "System.Windows.Media.Media3D" PresentationCore;
    678 Transform3DCollection "System.Windows.Media.Media3D" PresentationCore;
    679 Transform3DGroup "System.Windows.Media.Media3D" PresentationCore;
    680 TransformCollection "System.Windows.Media" PresentationCore;
    681 TransformConverter "System.Windows.Media" PresentationCore;
    682 TransformGroup "System.Windows.Media" PresentationCore;
    683 TransformedBitmap "System.Windows.Media.Imaging" PresentationCore;
    684 TranslateTransform "System.Windows.Media" PresentationCore;
    685 TranslateTransform3D "System.Windows.Media.Media3D" PresentationCore;
    686 TreeView "System.Windows.Controls" PresentationFramework;
    687 TreeViewItem "System.Windows.Controls" PresentationFramework;
    688 Trigger "System.Windows" PresentationFramework;
    689 TriggerAction "System.Windows" PresentationFramework;
    690 TriggerBase "System.Windows" PresentationFramework;
    691 TypeExtension "System.Windows.Markup" SystemXaml;
    692 TypeTypeConverter "System.Windows.Markup" PresentationFramework;
    693 Typography "System.Windows.Documents" PresentationFramework;
    694 UIElement "System.Windows" PresentationCore;
    695 UInt16 "System" Mscorlib;
    696 UInt16Converter "System.ComponentModel" System;
    697 UInt32 "System" Mscorlib;
    698 UInt32Converter "System.ComponentModel" System;
    699 UInt64 "System" Mscorlib;
    700 UInt64Converter "System.ComponentModel" System;
    701 UShortIListConverter "System.Windows.Media.Converters" PresentationCore;
    702 Underline "System.Windows.Documents" PresentationFramework;
    703 UniformGrid "System.Windows.Controls.Primitives" PresentationFramework;
    704 Uri "System" System;
    705 UriTypeConverter "System" System;
    706 UserControl "System.Windows.Controls" PresentationFramework;
    707 Validation "System.Windows.Controls" PresentationFramework;
    708 Vector "System.Windows" WindowsBase;
    709 Vector3D "System.Windows.Media.Media3D" PresentationCore;
    710 Vector3DAnimation "System.Windows.Media.Animation" PresentationCore;
    711 Vector3DAnimationBase "System.Windows.Media.Animation" PresentationCore;
    712 Vector3DAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    713 Vector3DCollection "System.Windows.Media.Media3D" PresentationCore;
    714 Vector3DCollectionConverter "System.Windows.Media.Media3D" PresentationCore;
    715 Vector3DConverter "System.Windows.Media.Media3D" PresentationCore;
    716 Vector3DKeyFrame "System.Windows.Media.Animation" PresentationCore;
    717 Vector3DKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    718 VectorAnimation "System.Windows.Media.Animation" PresentationCore;
    719 VectorAnimationBase "System.Windows.Media.Animation" PresentationCore;
    720 VectorAnimationUsingKeyFrames "System.Windows.Media.Animation" PresentationCore;
    721 VectorCollection "System.Windows.Media" PresentationCore;
    722 VectorCollectionConverter "System.Windows.Media" PresentationCore;
    723 VectorConverter "System.Windows" WindowsBase;
    724 VectorKeyFrame "System.Windows.Media.Animation" PresentationCore;
    725 VectorKeyFrameCollection "System.Windows.Media.Animation" PresentationCore;
    726 VideoDrawing "System.Windows.Media" PresentationCore;
    727 ViewBase "System.Windows.Controls" PresentationFramework;
    728 Viewbox "System.Windows.Controls" PresentationFramework;
    729 Viewport3D "System.Windows.Controls" PresentationFramework;
    730 Viewport3DVisual "System.Windows.Media.Media3D" PresentationCore;
    731 VirtualizingPanel "System.Windows.Controls" PresentationFramework;
    732 VirtualizingStackPanel "System.Windows.Controls" PresentationFramework;
    733 Visual "System.Windows.Media" PresentationCore;
    734 Visual3D "System.Windows.Media.Media3D" PresentationCore;
    735 VisualBrush "System.Windows.Media" PresentationCore;
    736 VisualTarget "System.Windows.Media" PresentationCore;
    737 WeakEventManager "System.Windows" WindowsBase;
    738 WhitespaceSignificantCollectionAttribute "System.Windows.Markup" SystemXaml;
    739 Window "System.Windows" PresentationFramework;
    740 WmpBitmapDecoder "System.Windows.Media.Imaging" PresentationCore;
    741 WmpBitmapEncoder "System.Windows.Media.Imaging" PresentationCore;
    742 WrapPanel "System.Windows.Controls" PresentationFramework;
    743 WriteableBitmap "System.Windows.Media.Imaging" PresentationCore;
    744 XamlBrushSerializer "System.Windows.Markup" PresentationFramework;
    745 XamlInt32CollectionSerializer "System.Windows.Markup" PresentationFramework;
    746 XamlPathDataSerializer "System.Windows.Markup" PresentationFramework;
    747 XamlPoint3DCollectionSerializer "System.Windows.Markup" PresentationFramework;
    748 XamlPointCollectionSerializer "System.Windows.Markup" PresentationFramework;
    749 XamlReader "System.Windows.Markup" PresentationFramework;
    750 XamlStyleSerializer "System.Windows.Markup" PresentationFramework;
    751 XamlTemplateSerializer "System.Windows.Markup" PresentationFramework;
    752 XamlVector3DCollectionSerializer "System.Windows.Markup" PresentationFramework;
    753 XamlWriter "System.Windows.Markup" PresentationFramework;
    754 XmlDataProvider "System.Windows.Data" PresentationFramework;
    755 XmlLangPropertyAttribute "System.Windows.Markup" SystemXaml;
    756 XmlLanguage "System.Windows.Markup" PresentationCore;
    757 XmlLanguageConverter "System.Windows.Markup" PresentationCore;
    758 XmlNamespaceMapping "System.Windows.Data" PresentationFramework;
    759 ZoomPercentageConverter "System.Windows.Documents" PresentationFramework;
}

known_properties! {
    1 1 Text;
    2 17 Storyboard;
    3 28 Children;
    4 50 Background;
    5 50 BorderBrush;
    6 50 BorderThickness;
    7 56 Command;
    8 56 CommandParameter;
    9 56 CommandTarget;
    10 56 IsPressed;
    11 90 MaxWidth;
    12 90 MinWidth;
    13 90 Width;
    14 100 Content;
    15 100 ContentTemplate;
    16 100 ContentTemplateSelector;
    17 100 HasContent;
    18 101 Focusable;
    19 102 Content;
    20 102 ContentSource;
    21 102 ContentTemplate;
    22 102 ContentTemplateSelector;
    23 102 RecognizesAccessKey;
    24 107 Background;
    25 107 BorderBrush;
    26 107 BorderThickness;
    27 107 FontFamily;
    28 107 FontSize;
    29 107 FontStretch;
    30 107 FontStyle;
    31 107 FontWeight;
    32 107 Foreground;
    33 107 HorizontalContentAlignment;
    34 107 IsTabStop;
    35 107 Padding;
    36 107 TabIndex;
    37 107 Template;
    38 107 VerticalContentAlignment;
    39 163 Dock;
    40 163 LastChildFill;
    41 167 Document;
    42 183 Children;
    43 211 Document;
    44 212 Document;
    45 225 Style;
    46 226 FlowDirection;
    47 226 Height;
    48 226 HorizontalAlignment;
    49 226 Margin;
    50 226 MaxHeight;
    51 226 MaxWidth;
    52 226 MinHeight;
    53 226 MinWidth;
    54 226 Name;
    55 226 Style;
    56 226 VerticalAlignment;
    57 226 Width;
    58 236 Children;
    59 242 Children;
    60 251 GradientStops;
    61 254 Column;
    62 254 ColumnSpan;
    63 254 Row;
    64 254 RowSpan;
    65 259 Header;
    66 269 HasHeader;
    67 269 Header;
    68 269 HeaderTemplate;
    69 269 HeaderTemplateSelector;
    70 270 HasHeader;
    71 270 Header;
    72 270 HeaderTemplate;
    73 270 HeaderTemplateSelector;
    74 273 NavigateUri;
    75 281 Source;
    76 281 Stretch;
    77 329 ItemContainerStyle;
    78 329 ItemContainerStyleSelector;
    79 329 ItemTemplate;
    80 329 ItemTemplateSelector;
    81 329 ItemsPanel;
    82 329 ItemsSource;
    83 384 Children;
    84 408 Children;
    85 434 Content;
    86 437 Background;
    87 442 Data;
    88 443 Segments;
    89 446 Figures;
    90 485 Child;
    91 485 IsOpen;
    92 485 Placement;
    93 485 PopupAnimation;
    94 541 Height;
    95 541 MaxHeight;
    96 541 MinHeight;
    97 550 CanContentScroll;
    98 550 HorizontalScrollBarVisibility;
    99 550 VerticalScrollBarVisibility;
    100 558 Fill;
    101 558 Stroke;
    102 558 StrokeThickness;
    103 638 Background;
    104 638 FontFamily;
    105 638 FontSize;
    106 638 FontStretch;
    107 638 FontStyle;
    108 638 FontWeight;
    109 638 Foreground;
    110 638 Text;
    111 638 TextDecorations;
    112 638 TextTrimming;
    113 638 TextWrapping;
    114 639 Text;
    115 648 Background;
    116 648 FontFamily;
    117 648 FontSize;
    118 648 FontStretch;
    119 648 FontStyle;
    120 648 FontWeight;
    121 648 Foreground;
    122 667 Children;
    123 675 IsDirectionReversed;
    124 675 Maximum;
    125 675 Minimum;
    126 675 Orientation;
    127 675 Value;
    128 675 ViewportSize;
    129 679 Children;
    130 682 Children;
    131 694 ClipToBounds;
    132 694 Focusable;
    133 694 IsEnabled;
    134 694 RenderTransform;
    135 694 Visibility;
    136 729 Children;
    138 2 Child;
    139 4 Child;
    140 8 Blocks;
    141 14 Items;
    142 37 Child;
    143 41 Inlines;
    144 45 KeyFrames;
    145 50 Child;
    146 54 Child;
    147 55 Content;
    148 56 Content;
    149 60 KeyFrames;
    150 66 Children;
    151 69 KeyFrames;
    152 74 Content;
    153 84 KeyFrames;
    154 92 Items;
    155 93 Content;
    156 105 Items;
    157 108 VisualTree;
    158 120 VisualTree;
    159 122 Setters;
    160 129 KeyFrames;
    161 133 Child;
    162 163 Children;
    163 166 Document;
    164 171 KeyFrames;
    165 198 Actions;
    166 199 Content;
    167 202 Blocks;
    168 205 Pages;
    169 206 References;
    170 207 Children;
    171 208 Blocks;
    172 209 Blocks;
    173 210 Document;
    174 231 VisualTree;
    175 254 Children;
    176 258 Columns;
    177 260 Content;
    178 264 Content;
    179 265 Content;
    180 269 Content;
    181 270 Items;
    182 271 VisualTree;
    183 273 Inlines;
    184 288 Children;
    185 289 Child;
    186 292 Child;
    187 300 NameValue;
    188 305 KeyFrames;
    189 312 KeyFrames;
    190 323 KeyFrames;
    191 327 Inlines;
    192 329 Items;
    193 330 VisualTree;
    194 346 Content;
    195 358 GradientStops;
    196 372 ListItems;
    197 373 Items;
    198 374 Content;
    199 376 Blocks;
    200 377 Items;
    201 378 Content;
    202 389 KeyFrames;
    203 401 Items;
    204 402 Items;
    205 403 Items;
    206 409 Children;
    207 416 Bindings;
    208 418 Setters;
    209 419 Setters;
    210 428 KeyFrames;
    211 435 Child;
    212 436 Content;
    213 437 Children;
    214 438 Inlines;
    215 439 Children;
    216 460 KeyFrames;
    217 470 KeyFrames;
    218 487 Bindings;
    219 497 KeyFrames;
    220 502 GradientStops;
    221 503 Content;
    222 510 KeyFrames;
    223 522 Content;
    224 527 Document;
    225 533 KeyFrames;
    226 542 Text;
    227 550 Content;
    228 551 Blocks;
    229 553 Items;
    230 562 KeyFrames;
    231 571 KeyFrames;
    232 580 Inlines;
    233 601 Children;
    234 604 Items;
    235 605 Content;
    236 608 Children;
    237 614 KeyFrames;
    238 620 Setters;
    239 623 Items;
    240 624 Content;
    241 625 Children;
    242 626 RowGroups;
    243 627 Blocks;
    244 629 Cells;
    245 630 Rows;
    246 638 Inlines;
    247 654 KeyFrames;
    248 668 Content;
    249 669 Items;
    250 670 Children;
    251 671 Children;
    252 672 ToolBars;
    253 673 Content;
    254 686 Items;
    255 687 Items;
    256 688 Setters;
    257 702 Inlines;
    258 703 Children;
    259 706 Content;
    260 712 KeyFrames;
    261 720 KeyFrames;
    262 728 Child;
    263 730 Children;
    264 731 Children;
    265 732 Children;
    266 739 Content;
    267 742 Children;
    268 754 XmlSerializer;
}

known_converters! {
    43 => 46;
    52 => 53;
    57 => 61;
    67 => 70;
    81 => 87;
    95 => 96;
    110 => 111;
    113 => 114;
    116 => 117;
    123 => 125;
    126 => 130;
    136 => 137;
    168 => 175;
    173 => 174;
    187 => 188;
    189 => 190;
    200 => 201;
    203 => 204;
    214 => 215;
    217 => 218;
    219 => 220;
    221 => 222;
    237 => 240;
    255 => 256;
    266 => 267;
    276 => 94;
    285 => 286;
    298 => 299;
    300 => 301;
    302 => 306;
    309 => 315;
    313 => 314;
    318 => 319;
    320 => 324;
    339 => 340;
    341 => 342;
    343 => 344;
    385 => 392;
    386 => 387;
    414 => 415;
    444 => 445;
    452 => 453;
    456 => 474;
    457 => 463;
    461 => 462;
    466 => 467;
    472 => 473;
    491 => 492;
    494 => 498;
    505 => 511;
    506 => 507;
    520 => 521;
    536 => 94;
    537 => 538;
    544 => 545;
    559 => 563;
    566 => 572;
    567 => 568;
    612 => 615;
    618 => 619;
    632 => 633;
    634 => 635;
    636 => 637;
    644 => 645;
    651 => 655;
    663 => 664;
    676 => 681;
    695 => 696;
    697 => 698;
    699 => 700;
    704 => 705;
    708 => 723;
    709 => 715;
    713 => 714;
    721 => 722;
    756 => 757;
}

/// Read-only view over the known tables.
#[derive(Debug, Clone, Copy)]
pub struct KnownTables {
    /// Types sorted by short name
    pub types: &'static [KnownType],
    /// Properties, two runs sorted by owner and name
    pub properties: &'static [KnownProperty],
    /// Converters sorted by type index
    pub converters: &'static [KnownConverter],
    /// Known strings
    pub strings: &'static [&'static str],
    /// Assembly that owns id -1
    pub framework: KnownAssembly,
}

impl KnownTables {
    /// The tables shipped with the format.
    #[must_use]
    pub const fn framework() -> KnownTables {
        KnownTables {
            types: KNOWN_TYPES,
            properties: KNOWN_PROPERTIES,
            converters: KNOWN_CONVERTERS,
            strings: KNOWN_STRINGS,
            framework: KnownAssembly::PresentationFramework,
        }
    }

    /// Find a known type by its full name and assembly.
    ///
    /// The short name is binary searched; the hit is only accepted if namespace and assembly
    /// match too.
    #[must_use]
    pub fn find_type(&self, assembly: &str, full_name: &str) -> Option<&'static KnownType> {
        let (namespace, name) = match full_name.rfind('.') {
            Some(dot) => (&full_name[..dot], &full_name[dot + 1..]),
            None => ("", full_name),
        };

        let position = self
            .types
            .binary_search_by(|known| known.name.as_bytes().cmp(name.as_bytes()))
            .ok()?;
        let known = &self.types[position];

        (known.namespace == namespace && known.assembly.name() == simple_assembly_name(assembly))
            .then_some(known)
    }

    /// Known type for a negative wire id.
    #[must_use]
    pub fn type_by_id(&self, id: i16) -> Option<&'static KnownType> {
        Self::by_index(self.types, id, |known| known.index)
    }

    /// Find a property declared by the known type `owner` (a negative wire id).
    #[must_use]
    pub fn find_property(&self, owner: i16, name: &str) -> Option<&'static KnownProperty> {
        let owner = u16::try_from(-i32::from(owner)).ok()?;
        self.properties
            .iter()
            .find(|known| known.owner == owner && known.name == name)
    }

    /// Known property for a negative wire id.
    #[must_use]
    pub fn property_by_id(&self, id: i16) -> Option<&'static KnownProperty> {
        Self::by_index(self.properties, id, |known| known.index)
    }

    /// The known converter type for a known type id, if it has one.
    #[must_use]
    pub fn converter_for(&self, type_id: i16) -> Option<&'static KnownType> {
        let entry = Self::by_index(self.converters, type_id, |known| known.target)?;
        let converter = i16::try_from(entry.converter).ok()?;
        self.type_by_id(-converter)
    }

    /// Id of a known string.
    #[must_use]
    pub fn find_string(&self, value: &str) -> Option<i16> {
        let position = self.strings.iter().position(|known| *known == value)?;
        i16::try_from(position + 1).ok().map(|index| -index)
    }

    /// Known string for a negative wire id.
    #[must_use]
    pub fn string_by_id(&self, id: i16) -> Option<&'static str> {
        let index = usize::try_from(-i32::from(id)).ok()?;
        index.checked_sub(1).and_then(|slot| self.strings.get(slot)).copied()
    }

    fn by_index<T>(
        table: &'static [T],
        id: i16,
        index: impl Fn(&T) -> u16,
    ) -> Option<&'static T> {
        let wanted = u16::try_from(-i32::from(id)).ok().filter(|&wanted| wanted > 0)?;
        let position = table.binary_search_by_key(&wanted, index).ok()?;
        Some(&table[position])
    }
}

impl Default for KnownTables {
    fn default() -> Self {
        Self::framework()
    }
}
